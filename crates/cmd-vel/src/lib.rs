//! cmd-vel: velocity commands and the timed emitter that publishes them
//!
//! A [`MotionCommand`] is republished by an [`Emitter`] at a fixed rate for a
//! requested duration, followed by a single zero command that halts the robot.
//! Publishing goes through the [`CommandSink`] trait so the same loop drives a
//! ROS 2 topic, a log line stream, or an in-memory recorder in tests.

mod types;
pub use types::{EmissionRequest, MotionCommand, Vector3};

mod error;
pub use error::{Result, SinkError};

mod traits;
pub use traits::CommandSink;

mod liveness;
pub use liveness::Liveness;

pub mod emitter;
pub use emitter::{EmissionReport, Emitter, EmitterConfig, StopReason};

mod log_sink;
pub use log_sink::LogSink;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::{RecordingSink, SinkRecord};

#[cfg(feature = "ros2")]
mod ros2;
#[cfg(feature = "ros2")]
pub use ros2::Ros2Sink;
