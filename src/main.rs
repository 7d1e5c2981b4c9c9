use clap::Parser;
use setroom::gameplay::{Config, Game};
use setroom::ui::LogUi;
use std::sync::Arc;

/// Headless demo: simulated agents race for sets until no valid set
/// remains anywhere or the process is killed.
#[derive(Parser)]
#[command(version, about = "Concurrent feature-matching card game demo")]
struct Args {
    /// JSON config file; the flags below override its values.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
    /// Number of simulated agents.
    #[arg(long)]
    robots: Option<usize>,
    /// Countdown length in milliseconds; 0 plays in elapsed mode.
    #[arg(long)]
    timeout: Option<u64>,
    /// Pause between generated robot key presses, in milliseconds.
    #[arg(long)]
    delay: Option<u64>,
    /// Log every valid set on the table after each replenish.
    #[arg(long)]
    hints: bool,
    /// Seed for deck shuffles and robot stimulus.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    setroom::log();
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if config.humans > 0 {
        log::warn!("human seats need a keypad feed; the demo seats robots only");
        config.humans = 0;
    }
    if let Some(robots) = args.robots {
        config.robots = robots;
    }
    if let Some(timeout) = args.timeout {
        config.turn_timeout = timeout;
    }
    if let Some(delay) = args.delay {
        config.robot_delay = delay;
    }
    if args.hints {
        config.hints = true;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Game::new(config, Arc::new(LogUi)).run();
    Ok(())
}
