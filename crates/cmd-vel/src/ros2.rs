//! ROS 2 `geometry_msgs/Twist` publisher backed by r2r.

use crate::{CommandSink, MotionCommand, Result, SinkError};
use parking_lot::Mutex;
use r2r::geometry_msgs::msg::{Twist, Vector3};
use r2r::QosProfile;

/// Publishes commands on a ROS 2 topic.
///
/// Owns the node so the publisher handle stays valid for the sink's lifetime.
/// Publishing only needs the node alive, not spinning.
pub struct Ros2Sink {
    topic: String,
    _node: Mutex<r2r::Node>,
    publisher: Mutex<r2r::Publisher<Twist>>,
}

impl Ros2Sink {
    pub fn new(node_name: &str, topic: &str) -> Result<Self> {
        let ctx = r2r::Context::create().map_err(|e| SinkError::Backend(e.to_string()))?;
        let mut node =
            r2r::Node::create(ctx, node_name, "").map_err(|e| SinkError::Backend(e.to_string()))?;
        let publisher = node
            .create_publisher::<Twist>(topic, QosProfile::default())
            .map_err(|e| SinkError::Backend(e.to_string()))?;
        tracing::info!("ROS 2 node '{}' publishing on {}", node_name, topic);
        Ok(Self {
            topic: topic.to_string(),
            _node: Mutex::new(node),
            publisher: Mutex::new(publisher),
        })
    }
}

fn to_twist(command: &MotionCommand) -> Twist {
    Twist {
        linear: Vector3 {
            x: command.linear.x,
            y: command.linear.y,
            z: command.linear.z,
        },
        angular: Vector3 {
            x: command.angular.x,
            y: command.angular.y,
            z: command.angular.z,
        },
    }
}

impl CommandSink for Ros2Sink {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn publish(&self, command: &MotionCommand) -> Result<()> {
        self.publisher
            .lock()
            .publish(&to_twist(command))
            .map_err(|e| SinkError::Unavailable(e.to_string()))
    }
}
