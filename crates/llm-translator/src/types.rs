use cmd_vel::{EmissionRequest, MotionCommand, Vector3};
use serde::{Deserialize, Serialize};

/// One prompt sent to a completion service
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    /// Sampling temperature; kept low so replies stay close to the schema
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
        }
    }
}

/// Coarse motion classes for the short-answer classification prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscreteAction {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
    Unknown,
}

impl DiscreteAction {
    pub const ALL: [DiscreteAction; 6] = [
        DiscreteAction::Forward,
        DiscreteAction::Backward,
        DiscreteAction::Left,
        DiscreteAction::Right,
        DiscreteAction::Stop,
        DiscreteAction::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscreteAction::Forward => "forward",
            DiscreteAction::Backward => "backward",
            DiscreteAction::Left => "left",
            DiscreteAction::Right => "right",
            DiscreteAction::Stop => "stop",
            DiscreteAction::Unknown => "unknown",
        }
    }

    /// Preset velocity for this action.
    ///
    /// `Stop` maps to a zero-length run, which publishes only the halt
    /// command. `Unknown` produces nothing.
    pub fn to_request(&self, duration_s: f64) -> Option<EmissionRequest> {
        let (linear_x, angular_z) = match self {
            DiscreteAction::Forward => (1.0, 0.0),
            DiscreteAction::Backward => (-1.0, 0.0),
            DiscreteAction::Left => (0.0, 1.0),
            DiscreteAction::Right => (0.0, -1.0),
            DiscreteAction::Stop => return Some(EmissionRequest::new(MotionCommand::zero(), 0.0)),
            DiscreteAction::Unknown => return None,
        };
        let command = MotionCommand::new(
            Vector3::new(linear_x, 0.0, 0.0),
            Vector3::new(0.0, 0.0, angular_z),
        );
        Some(EmissionRequest::new(command, duration_s))
    }
}

impl std::fmt::Display for DiscreteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
