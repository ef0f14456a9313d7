//! Capture-demo binary: toggles an OMX camera between preview and image mode.

use std::time::Duration;

use capture_demo::config::{DEFAULT_CAPTURE_LOCATION, DEFAULT_PHASE_DELAY};
use capture_demo::DemoConfig;
use clap::Parser;

#[derive(Parser)]
#[command(name = "capture-demo")]
#[command(about = "Switch a camera between preview and image capture on a timer")]
#[command(version)]
struct Cli {
    /// Full pipeline description, replacing the built-in OMX camera pipeline
    #[arg(short, long)]
    pipeline: Option<String>,

    /// File pattern for captured JPEG images
    #[arg(short, long, default_value = DEFAULT_CAPTURE_LOCATION)]
    location: String,

    /// Seconds between phases
    #[arg(short = 'd', long, default_value_t = DEFAULT_PHASE_DELAY.as_secs())]
    phase_delay: u64,
}

impl Cli {
    fn into_config(self) -> DemoConfig {
        DemoConfig {
            description: self
                .pipeline
                .unwrap_or_else(|| DemoConfig::capture_description(&self.location)),
            phase_delay: Duration::from_secs(self.phase_delay),
        }
    }
}

fn main() {
    // Set RUST_LOG to control verbosity, e.g. RUST_LOG=capture_demo=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Cli::parse().into_config();

    if let Err(err) = capture_demo::demo::run(&config) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
