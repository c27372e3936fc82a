//! Turtle agent
//!
//! Reads natural-language commands from stdin, asks a hosted LLM to turn each
//! one into a velocity command and duration, and publishes the result at
//! 10 Hz before halting the robot:
//! Text → Completion service → Twist JSON → Timed emitter → cmd_vel

mod config;
mod dispatch;

use anyhow::{Context, Result};
use clap::Parser;
use cmd_vel::{CommandSink, Emitter, Liveness, LogSink};
use config::{AgentConfig, TranslationMode};
use dispatch::{spawn_line_reader, Dispatcher};
use llm_translator::{CohereChatClient, CompletionService, ScriptedCompletion, Translator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "turtle-agent")]
#[command(about = "Drive a robot with natural-language commands through an LLM")]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use a canned completion reply instead of the hosted service
    #[arg(long)]
    mock: bool,

    /// Translation mode (overrides config)
    #[arg(long, value_enum)]
    mode: Option<TranslationMode>,

    /// Publish rate in Hz (overrides config)
    #[arg(long)]
    rate_hz: Option<f64>,

    /// Topic to publish on (overrides config)
    #[arg(long)]
    topic: Option<String>,

    /// Publish through ROS 2 instead of printing JSON lines
    #[cfg(feature = "ros2")]
    #[arg(long)]
    ros2: bool,

    /// Run a single command to completion and exit
    #[arg(long)]
    command: Option<String>,

    /// Debug logging (when RUST_LOG is unset)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut AgentConfig) {
        if let Some(mode) = self.mode {
            config.translator.mode = mode;
        }
        if let Some(rate_hz) = self.rate_hz {
            config.emitter.rate_hz = rate_hz;
        }
        if let Some(topic) = &self.topic {
            config.emitter.topic = topic.clone();
        }
    }
}

const MOCK_TWIST_REPLY: &str = r#"{"twist": {"linear": {"x": 1.0, "y": 0.0, "z": 0.0}, "angular": {"x": 0.0, "y": 0.0, "z": 0.0}}, "duration": 1.0}"#;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing(args.verbose);

    let mut config = match &args.config {
        Some(path) => AgentConfig::load(path)?,
        None => AgentConfig::default(),
    };
    args.apply(&mut config);

    // The credential is checked before anything else starts
    let service: Arc<dyn CompletionService> = if args.mock {
        let reply = match config.translator.mode {
            TranslationMode::Twist => MOCK_TWIST_REPLY,
            TranslationMode::Discrete => "forward",
        };
        Arc::new(ScriptedCompletion::repeating(reply))
    } else {
        let client = CohereChatClient::from_env(&config.completion.api_key_env, config.cohere())
            .context("creating completion client")?;
        Arc::new(client)
    };
    let translator = Translator::new(service, config.translator());

    let sink = build_sink(&args, &config)?;
    let liveness = Liveness::new();
    let emitter = Emitter::new(sink.clone(), liveness.clone(), config.emitter());

    info!("💬 turtle agent started, publishing on {}", sink.topic());

    let signal_liveness = liveness.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl+C received, shutting down"),
            Err(e) => error!("failed to listen for Ctrl+C: {}", e),
        }
        signal_liveness.shutdown();
    });

    let dispatcher = Dispatcher::new(
        translator,
        emitter,
        config.translator.mode,
        config.translator.discrete_duration_s,
    );

    if let Some(command) = &args.command {
        if dispatcher.run_once(command).await.is_none() {
            anyhow::bail!("command was not executed: {command}");
        }
        return Ok(());
    }

    // Prompt goes to stderr so stdout carries only sink output
    let lines = spawn_line_reader(
        std::io::BufReader::new(std::io::stdin()),
        "🚀 command> ",
        std::io::stderr(),
    )
    .context("starting input reader")?;
    dispatcher.run(lines).await;

    info!("turtle agent stopped");
    Ok(())
}

fn build_sink(args: &Args, config: &AgentConfig) -> Result<Arc<dyn CommandSink>> {
    #[cfg(feature = "ros2")]
    {
        if args.ros2 {
            let sink = cmd_vel::Ros2Sink::new(&config.emitter.node_name, &config.emitter.topic)
                .context("creating ROS 2 publisher")?;
            return Ok(Arc::new(sink));
        }
    }
    #[cfg(not(feature = "ros2"))]
    let _ = args;

    Ok(Arc::new(LogSink::stdout(config.emitter.topic.clone())))
}

fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
