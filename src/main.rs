use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use canvas_viewport::config::{ConfigOverrides, ViewportConfig};
use canvas_viewport::replay::{ReplayError, load_script, run_script};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Scale and grid flags override the `VIEWPORT_*` environment, which in turn
/// overrides the built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "canvas-replay", about = "Replay viewport input scripts and print committed cameras")]
struct Cli {
    /// JSON script of viewport input events.
    #[arg(long)]
    script: PathBuf,

    #[arg(long)]
    min_scale: Option<f64>,

    #[arg(long)]
    max_scale: Option<f64>,

    #[arg(long)]
    wheel_intensity: Option<f64>,

    /// Grid dot spacing at scale 1, in pixels.
    #[arg(long)]
    grid_gap: Option<f64>,
}

impl Cli {
    fn config(&self) -> Result<ViewportConfig, ReplayError> {
        let overrides = ConfigOverrides {
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            wheel_intensity: self.wheel_intensity,
            grid_gap: self.grid_gap,
        };
        Ok(ViewportConfig::from_env()?.with_overrides(&overrides)?)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, script = %cli.script.display(), "replay failed");
            eprintln!("canvas-replay: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ReplayError> {
    let config = cli.config()?;
    let script = load_script(&cli.script)?;
    tracing::info!(events = script.events.len(), "replaying script");

    let frames = run_script(config, &script);
    let mut out = io::stdout().lock();
    for frame in &frames {
        serde_json::to_writer(&mut out, frame)?;
        writeln!(out)?;
    }
    out.flush()?;
    tracing::info!(frames = frames.len(), "replay complete");
    Ok(())
}
