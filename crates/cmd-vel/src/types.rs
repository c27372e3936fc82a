use core::fmt;
use serde::{Deserialize, Serialize};

/// Three-axis vector, laid out like `geometry_msgs/Vector3`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Linear and angular velocity, laid out like `geometry_msgs/Twist`.
///
/// No range checks: magnitudes are passed through as given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionCommand {
    /// Linear velocity (m/s)
    pub linear: Vector3,
    /// Angular velocity (rad/s)
    pub angular: Vector3,
}

impl MotionCommand {
    pub fn new(linear: Vector3, angular: Vector3) -> Self {
        Self { linear, angular }
    }

    /// The all-zero command used to halt motion.
    pub const fn zero() -> Self {
        Self {
            linear: Vector3::ZERO,
            angular: Vector3::ZERO,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "linear=({:.2}, {:.2}, {:.2}) angular=({:.2}, {:.2}, {:.2})",
            self.linear.x,
            self.linear.y,
            self.linear.z,
            self.angular.x,
            self.angular.y,
            self.angular.z
        )
    }
}

/// A command plus how long to keep publishing it, handed to one emitter run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmissionRequest {
    pub command: MotionCommand,
    /// Seconds to publish `command` before halting.
    pub duration_s: f64,
}

impl EmissionRequest {
    pub fn new(command: MotionCommand, duration_s: f64) -> Self {
        Self {
            command,
            duration_s,
        }
    }
}
