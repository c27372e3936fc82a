//! Timed emitter: publish a command at a fixed rate for a duration, then halt.
//!
//! A run goes Running → Halting → Done. While running, every cycle first
//! checks whether the requested duration has elapsed or the process is
//! shutting down, then publishes the command and waits for the next tick.
//! Halting publishes exactly one zero command. Runs are independent: nothing
//! stops two runs from publishing to the same sink at once.

use crate::{CommandSink, EmissionRequest, Liveness, MotionCommand};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

/// Emitter settings
#[derive(Debug, Clone, Copy)]
pub struct EmitterConfig {
    /// Publish rate in Hz (one publish per cycle)
    pub rate_hz: f64,
}

impl EmitterConfig {
    pub const DEFAULT_RATE_HZ: f64 = 10.0;

    /// Whether `rate_hz` is a positive finite number.
    pub fn is_valid(&self) -> bool {
        self.rate_hz.is_finite() && self.rate_hz > 0.0
    }

    /// Cycle period. Falls back to the default rate when the configured rate
    /// is not valid.
    pub fn period(&self) -> Duration {
        let rate = if self.is_valid() {
            self.rate_hz
        } else {
            Self::DEFAULT_RATE_HZ
        };
        Duration::try_from_secs_f64(1.0 / rate)
            .unwrap_or_else(|_| Duration::from_millis(100))
            .max(Duration::from_millis(1))
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            rate_hz: Self::DEFAULT_RATE_HZ,
        }
    }
}

/// Why a run left the Running state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Requested duration elapsed
    Elapsed,
    /// Process shutdown began
    Shutdown,
    /// The sink refused a publish; handled like a shutdown
    SinkUnavailable,
}

/// Summary of one finished run, used for the completion log.
#[derive(Debug, Clone)]
pub struct EmissionReport {
    pub run_id: Uuid,
    /// Number of times the requested command was published
    pub cycles: u32,
    pub stop_reason: StopReason,
    /// Whether the final zero command was accepted by the sink
    pub halted: bool,
    pub elapsed: Duration,
}

/// Publishes emission requests to a shared sink.
///
/// Cheap to clone; each [`Emitter::spawn`] starts an independent run.
#[derive(Clone)]
pub struct Emitter {
    sink: Arc<dyn CommandSink>,
    liveness: Liveness,
    config: EmitterConfig,
}

impl Emitter {
    pub fn new(sink: Arc<dyn CommandSink>, liveness: Liveness, config: EmitterConfig) -> Self {
        Self {
            sink,
            liveness,
            config,
        }
    }

    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    /// Start a run on its own task and return immediately.
    pub fn spawn(&self, request: EmissionRequest) -> JoinHandle<EmissionReport> {
        let this = self.clone();
        tokio::spawn(async move { this.run(request).await })
    }

    /// Publish `request.command` until its duration elapses or shutdown
    /// begins, then publish one zero command.
    pub async fn run(&self, request: EmissionRequest) -> EmissionReport {
        let run_id = Uuid::new_v4();
        let run_length = run_length(request.duration_s);
        let period = self.config.period();

        debug!(
            %run_id,
            topic = self.sink.topic(),
            "emitting {} for {:.2}s",
            request.command,
            run_length.as_secs_f64()
        );

        let start = Instant::now();
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        let mut cycles = 0u32;
        let stop_reason = loop {
            if start.elapsed() >= run_length {
                break StopReason::Elapsed;
            }
            if !self.liveness.is_alive() {
                break StopReason::Shutdown;
            }
            if let Err(e) = self.sink.publish(&request.command) {
                debug!(%run_id, "publish failed, stopping: {}", e);
                break StopReason::SinkUnavailable;
            }
            cycles = cycles.saturating_add(1);
            ticker.tick().await;
        };

        let halted = match self.sink.publish(&MotionCommand::zero()) {
            Ok(()) => true,
            Err(e) => {
                debug!(%run_id, "halt publish failed: {}", e);
                false
            }
        };

        let report = EmissionReport {
            run_id,
            cycles,
            stop_reason,
            halted,
            elapsed: start.elapsed(),
        };
        info!(
            %run_id,
            cycles = report.cycles,
            reason = ?report.stop_reason,
            "✅ stopped after {:.2}s",
            report.elapsed.as_secs_f64()
        );
        report
    }
}

/// Requested duration as a `Duration`; NaN and non-positive values mean
/// "halt right away".
fn run_length(seconds: f64) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        Duration::ZERO
    } else {
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordingSink, Vector3};

    fn forward(x: f64) -> MotionCommand {
        MotionCommand::new(Vector3::new(x, 0.0, 0.0), Vector3::ZERO)
    }

    fn emitter_with(sink: Arc<RecordingSink>, liveness: Liveness) -> Emitter {
        Emitter::new(sink, liveness, EmitterConfig::default())
    }

    #[test]
    fn test_default_period() {
        assert_eq!(EmitterConfig::default().period(), Duration::from_millis(100));
        assert_eq!(
            EmitterConfig { rate_hz: 20.0 }.period(),
            Duration::from_millis(50)
        );
    }

    #[test]
    fn test_invalid_rate_falls_back_to_default() {
        assert!(EmitterConfig::default().is_valid());
        for rate_hz in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(!EmitterConfig { rate_hz }.is_valid());
            assert_eq!(
                EmitterConfig { rate_hz }.period(),
                Duration::from_millis(100)
            );
        }
    }

    #[test]
    fn test_run_length() {
        assert_eq!(run_length(1.5), Duration::from_millis(1500));
        assert_eq!(run_length(0.0), Duration::ZERO);
        assert_eq!(run_length(-2.0), Duration::ZERO);
        assert_eq!(run_length(f64::NAN), Duration::ZERO);
        assert_eq!(run_length(f64::INFINITY), Duration::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_second_run_publishes_ten_then_halts() {
        let sink = Arc::new(RecordingSink::default());
        let emitter = emitter_with(sink.clone(), Liveness::new());

        let start = Instant::now();
        let report = emitter
            .run(EmissionRequest::new(forward(1.0), 1.0))
            .await;

        assert_eq!(report.stop_reason, StopReason::Elapsed);
        assert!(report.halted);
        assert!((9..=11).contains(&report.cycles), "cycles = {}", report.cycles);

        let commands = sink.commands();
        assert_eq!(commands.len(), report.cycles as usize + 1);
        assert!(commands[..commands.len() - 1]
            .iter()
            .all(|c| *c == forward(1.0)));
        assert!(commands[commands.len() - 1].is_zero());

        // Zero command lands within one period of the deadline
        let records = sink.records();
        let halt_at = records[records.len() - 1].at.duration_since(start);
        assert!(halt_at >= Duration::from_secs(1));
        assert!(halt_at <= Duration::from_millis(1100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_cadence_is_ten_hz() {
        let sink = Arc::new(RecordingSink::default());
        let emitter = emitter_with(sink.clone(), Liveness::new());

        let report = emitter
            .run(EmissionRequest::new(forward(0.5), 3.0))
            .await;

        let per_second = report.cycles as f64 / 3.0;
        assert!((9.0..=11.0).contains(&per_second), "rate = {per_second}");

        let records = sink.records();
        for pair in records[..records.len() - 1].windows(2) {
            let gap = pair[1].at.duration_since(pair[0].at);
            assert_eq!(gap, Duration::from_millis(100));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_only_halts() {
        let sink = Arc::new(RecordingSink::default());
        let emitter = emitter_with(sink.clone(), Liveness::new());

        let report = emitter
            .run(EmissionRequest::new(forward(2.0), 0.0))
            .await;

        assert_eq!(report.cycles, 0);
        assert_eq!(sink.commands(), vec![MotionCommand::zero()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_run_early() {
        let sink = Arc::new(RecordingSink::default());
        let liveness = Liveness::new();
        let emitter = emitter_with(sink.clone(), liveness.clone());

        let handle = emitter.spawn(EmissionRequest::new(forward(1.0), 10.0));
        time::sleep(Duration::from_millis(350)).await;
        liveness.shutdown();

        let report = handle.await.unwrap();
        assert_eq!(report.stop_reason, StopReason::Shutdown);
        assert_eq!(report.cycles, 4);
        assert!(report.elapsed < Duration::from_millis(500));

        let commands = sink.commands();
        assert_eq!(commands.len(), 5);
        assert!(commands[4].is_zero());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_sink_ends_run_quietly() {
        let sink = Arc::new(RecordingSink::default());
        let emitter = emitter_with(sink.clone(), Liveness::new());

        let handle = emitter.spawn(EmissionRequest::new(forward(1.0), 5.0));
        time::sleep(Duration::from_millis(250)).await;
        sink.set_available(false);

        let report = handle.await.unwrap();
        assert_eq!(report.stop_reason, StopReason::SinkUnavailable);
        assert!(!report.halted);
        assert_eq!(report.cycles, 3);
        assert_eq!(sink.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_runs_interleave() {
        let sink = Arc::new(RecordingSink::default());
        let emitter = emitter_with(sink.clone(), Liveness::new());
        let first = forward(1.0);
        let second = MotionCommand::new(Vector3::ZERO, Vector3::new(0.0, 0.0, 1.0));

        let a = emitter.spawn(EmissionRequest::new(first, 5.0));
        time::sleep(Duration::from_millis(200)).await;
        let b = emitter.spawn(EmissionRequest::new(second, 5.0));

        let report_a = a.await.unwrap();
        let report_b = b.await.unwrap();
        assert_eq!(report_a.stop_reason, StopReason::Elapsed);
        assert_eq!(report_b.stop_reason, StopReason::Elapsed);

        let commands = sink.commands();
        let last_first = commands.iter().rposition(|c| *c == first).unwrap();
        let first_second = commands.iter().position(|c| *c == second).unwrap();
        assert!(
            first_second < last_first,
            "runs did not overlap at the sink"
        );
        assert_eq!(commands.iter().filter(|c| c.is_zero()).count(), 2);
        assert_eq!(commands.iter().filter(|c| **c == first).count(), 50);
        assert_eq!(commands.iter().filter(|c| **c == second).count(), 50);
    }
}
