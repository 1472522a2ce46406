//! Arcade Chess - play chess in the terminal.
//!
//! Reads commands from stdin and draws the board on stdout. Logs go to
//! stderr so they never mix with the board.

mod command;
mod config;
mod session;
mod view;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use config::{ArcadeConfig, Glyphs};
use session::Session;
use tracing_subscriber::EnvFilter;

/// Arcade Chess - two players, one terminal.
#[derive(Parser)]
#[command(name = "arcade-chess")]
#[command(about = "Play chess in the terminal")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value_os_t = ArcadeConfig::default_path())]
    config: PathBuf,

    /// Piece style, overriding the config file
    #[arg(long, value_enum)]
    glyphs: Option<Glyphs>,

    /// Increase log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(args.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = ArcadeConfig::load(&args.config)?;
    if let Some(glyphs) = args.glyphs {
        config.glyphs = glyphs;
    }
    tracing::info!("Config: {:?}", config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), config);
    session.run()?;

    let game = session.game();
    if let Some(outcome) = game.outcome() {
        tracing::info!("Game finished: {}", outcome);
    }
    Ok(())
}
