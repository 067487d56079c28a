use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use vrscriber::config::{Config, Handedness};
use vrscriber::replay::{self, Trace};

#[derive(Parser, Debug)]
#[command(name = "vrscriber")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VRSCRIBER_GIT_HASH"), ")"),
    about = "Two-handed VR sketching interaction controller"
)]
struct Cli {
    /// Recorded trace to replay through the controller
    #[arg(long, short = 't', value_name = "TRACE")]
    trace: PathBuf,

    /// Config file (defaults to ~/.config/vrscriber/config.toml)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the collaborator call journal as JSON
    #[arg(long, short = 'j', value_name = "PATH")]
    journal: Option<PathBuf>,

    /// Treat the left controller as the primary hand
    #[arg(long, action = ArgAction::SetTrue)]
    left_handed: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.left_handed {
        config.hands.handedness = Handedness::Left;
    }

    let trace = Trace::load(&cli.trace)
        .with_context(|| format!("Failed to load trace {}", cli.trace.display()))?;
    trace.check_models(&config)?;
    log::info!(
        "Replaying {} frames ({:.1}s) over {} steps",
        trace.frames.len(),
        trace.duration(),
        trace.steps.len()
    );

    let outcome = replay::run(&trace, config);

    if let Some(path) = &cli.journal {
        outcome.journal.save(path, &cli.trace, &outcome.summary)?;
    }

    println!("{}", outcome.summary);
    Ok(())
}
