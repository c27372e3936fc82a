use crate::{CommandSink, MotionCommand, Result, SinkError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::Instant;

/// One publish seen by a [`RecordingSink`].
#[derive(Clone, Copy, Debug)]
pub struct SinkRecord {
    pub at: Instant,
    pub command: MotionCommand,
}

/// In-memory sink that records every publish. Can be switched to
/// unavailable to simulate a dropped publisher.
pub struct RecordingSink {
    topic: String,
    records: Mutex<Vec<SinkRecord>>,
    available: AtomicBool,
}

impl RecordingSink {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            records: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<SinkRecord> {
        self.records.lock().clone()
    }

    pub fn commands(&self) -> Vec<MotionCommand> {
        self.records.lock().iter().map(|r| r.command).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new("mock")
    }
}

impl CommandSink for RecordingSink {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn publish(&self, command: &MotionCommand) -> Result<()> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(SinkError::Unavailable(self.topic.clone()));
        }
        self.records.lock().push(SinkRecord {
            at: Instant::now(),
            command: *command,
        });
        Ok(())
    }
}
