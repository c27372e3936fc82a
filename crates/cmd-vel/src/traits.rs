use crate::{MotionCommand, Result};

/// Destination for velocity commands (a topic publisher or a stand-in).
///
/// Sinks are shared between concurrently running emitters, so `publish` takes
/// `&self`. There is no acknowledgment: `Ok` only means the command was handed
/// off.
pub trait CommandSink: Send + Sync {
    /// Name of the topic or channel commands are published on.
    fn topic(&self) -> &str;

    /// Publish one command.
    fn publish(&self, command: &MotionCommand) -> Result<()>;
}
