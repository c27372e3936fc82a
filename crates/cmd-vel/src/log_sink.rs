use crate::{CommandSink, MotionCommand, Result, SinkError};
use parking_lot::Mutex;
use serde::Serialize;
use std::io::Write;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Writes each published command as one JSON line.
///
/// Stand-in for a middleware topic when no ROS 2 install is available; the
/// output can be piped into anything that reads JSON lines.
pub struct LogSink<W: Write + Send = std::io::Stdout> {
    topic: String,
    out: Mutex<W>,
}

impl LogSink<std::io::Stdout> {
    pub fn stdout(topic: impl Into<String>) -> Self {
        Self::new(topic, std::io::stdout())
    }
}

impl<W: Write + Send> LogSink<W> {
    pub fn new(topic: impl Into<String>, out: W) -> Self {
        Self {
            topic: topic.into(),
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

#[derive(Serialize)]
struct LogLine<'a> {
    ts: String,
    topic: &'a str,
    #[serde(flatten)]
    command: &'a MotionCommand,
}

impl<W: Write + Send> CommandSink for LogSink<W> {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn publish(&self, command: &MotionCommand) -> Result<()> {
        let ts = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| SinkError::Backend(e.to_string()))?;
        let line = serde_json::to_string(&LogLine {
            ts,
            topic: &self.topic,
            command,
        })
        .map_err(|e| SinkError::Backend(e.to_string()))?;

        let mut out = self.out.lock();
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}
