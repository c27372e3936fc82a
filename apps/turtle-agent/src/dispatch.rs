//! Interactive dispatch: one line in, at most one emitter run out.
//!
//! Translation happens inline; the resulting run is spawned and the loop goes
//! straight back to reading. Runs from earlier lines keep going, so several
//! may publish to the sink at the same time.

use crate::config::TranslationMode;
use anyhow::Result;
use cmd_vel::{EmissionReport, EmissionRequest, Emitter};
use llm_translator::Translator;
use std::io::{BufRead, Write};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// What happened to one input line
#[derive(Debug)]
pub enum Outcome {
    /// A run was spawned for the line
    Started(JoinHandle<EmissionReport>),
    /// Translation failed; nothing was started
    Rejected,
    /// Blank line
    Skipped,
    /// Operator asked to exit
    Quit,
}

pub struct Dispatcher {
    translator: Translator,
    emitter: Emitter,
    mode: TranslationMode,
    discrete_duration_s: f64,
}

impl Dispatcher {
    pub fn new(
        translator: Translator,
        emitter: Emitter,
        mode: TranslationMode,
        discrete_duration_s: f64,
    ) -> Self {
        Self {
            translator,
            emitter,
            mode,
            discrete_duration_s,
        }
    }

    async fn request_for(&self, text: &str) -> Option<EmissionRequest> {
        match self.mode {
            TranslationMode::Twist => self.translator.translate(text).await,
            TranslationMode::Discrete => {
                let action = self.translator.classify(text).await;
                debug!("classified '{}' as {}", text, action);
                action.to_request(self.discrete_duration_s)
            }
        }
    }

    pub async fn handle_line(&self, line: &str) -> Outcome {
        let text = line.trim();
        if text.is_empty() {
            return Outcome::Skipped;
        }
        if text.eq_ignore_ascii_case("quit") || text.eq_ignore_ascii_case("exit") {
            return Outcome::Quit;
        }

        match self.request_for(text).await {
            Some(request) => {
                info!(
                    "🌀 moving for {:.2}s then stopping: {}",
                    request.duration_s, request.command
                );
                Outcome::Started(self.emitter.spawn(request))
            }
            None => {
                warn!("⚠️ could not build a motion command for '{}'", text);
                Outcome::Rejected
            }
        }
    }

    /// Translate and start a single command, then wait for its run to finish.
    pub async fn run_once(&self, text: &str) -> Option<EmissionReport> {
        match self.handle_line(text).await {
            Outcome::Started(handle) => match handle.await {
                Ok(report) => Some(report),
                Err(e) => {
                    warn!("emitter task failed: {}", e);
                    None
                }
            },
            _ => None,
        }
    }

    /// Consume lines until input closes, the operator quits, or shutdown
    /// begins. On the way out, shutdown is signalled so every in-flight run
    /// halts, and those runs are awaited.
    pub async fn run(&self, mut lines: mpsc::Receiver<String>) {
        let liveness = self.emitter.liveness().clone();
        let mut in_flight: Vec<JoinHandle<EmissionReport>> = Vec::new();

        loop {
            let line = tokio::select! {
                line = lines.recv() => line,
                _ = liveness.stopped() => break,
            };
            let Some(line) = line else {
                info!("input closed");
                break;
            };

            // A pending completion call must not hold off shutdown
            let outcome = tokio::select! {
                outcome = self.handle_line(&line) => outcome,
                _ = liveness.stopped() => break,
            };
            match outcome {
                Outcome::Started(handle) => in_flight.push(handle),
                Outcome::Quit => {
                    info!("quit requested");
                    break;
                }
                Outcome::Rejected | Outcome::Skipped => {}
            }
            in_flight.retain(|handle| !handle.is_finished());
        }

        liveness.shutdown();
        for handle in in_flight {
            let _ = handle.await;
        }
    }
}

/// Read lines from `input` on a dedicated thread, writing `prompt` to
/// `prompt_out` before each read. The prompt never shares a stream with the
/// sink output. The channel closes on EOF, on a read error, or once the
/// receiver is dropped.
pub fn spawn_line_reader<R, P>(
    input: R,
    prompt: &'static str,
    prompt_out: P,
) -> Result<mpsc::Receiver<String>>
where
    R: BufRead + Send + 'static,
    P: Write + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    std::thread::Builder::new()
        .name("line-reader".to_string())
        .spawn(move || {
            let mut input = input;
            let mut prompt_out = prompt_out;
            loop {
                if !prompt.is_empty() {
                    let _ = write!(prompt_out, "{prompt}");
                    let _ = prompt_out.flush();
                }
                let mut line = String::new();
                match input.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("input read failed: {}", e);
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}
