//! Terminal Snake runner (default binary).
//!
//! Loads the configuration, sets up file logging (the terminal itself is the
//! render surface), then hands the terminal and the input stream to the
//! lifecycle supervisor until the player quits.

use std::fs::File;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tui_snake::engine::{load_config, Supervisor};
use tui_snake::input::{spawn_input_pump, KeyMap};
use tui_snake::term::TermSceneRenderer;
use tui_snake::types::GameConfig;

/// Inputs buffered between the terminal reader and the supervisor.
const INPUT_QUEUE: usize = 64;

#[derive(Debug, Parser)]
#[command(name = "tui-snake", about = "Snake in the terminal")]
struct Cli {
    /// JSON config file (falls back to $SNAKE_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for apple placement (defaults to the clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Where tracing output goes
    #[arg(long, default_value = "tui-snake.log")]
    log_file: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;

    let config = load_config(cli.config.as_deref())?;
    let keymap = KeyMap::from_bindings(&config.keys).context("invalid key bindings")?;
    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!(?config, seed, "starting");

    let surface = TermSceneRenderer::new(config.field());
    let result = with_terminal(
        surface,
        |surface| surface.terminal_mut().enter(),
        |surface| surface.terminal_mut().exit(),
        |surface| play(config, seed, keymap, surface),
    )
    .await;
    info!("bye");
    result
}

/// Set the terminal up, play, then restore it.
///
/// Restoring also runs when setup failed partway, since raw mode may
/// already be on by then.
async fn with_terminal<T, Fut>(
    mut surface: T,
    enter: fn(&mut T) -> Result<()>,
    exit: fn(&mut T) -> Result<()>,
    body: impl FnOnce(T) -> Fut,
) -> Result<()>
where
    Fut: Future<Output = (Result<()>, T)>,
{
    let (result, mut surface) = match enter(&mut surface) {
        Ok(()) => body(surface).await,
        Err(err) => (Err(err.context("terminal setup")), surface),
    };
    if let Err(err) = exit(&mut surface) {
        error!(error = %format!("{err:#}"), "terminal restore failed");
    }
    result
}

async fn play(
    config: GameConfig,
    seed: u32,
    keymap: KeyMap,
    surface: TermSceneRenderer,
) -> (Result<()>, TermSceneRenderer) {
    let (tx, mut rx) = mpsc::channel(INPUT_QUEUE);
    let pump = spawn_input_pump(keymap, tx);

    let mut supervisor = Supervisor::new(config, seed, surface);
    let result = supervisor.run(&mut rx).await;
    pump.abort();
    (result, supervisor.into_renderer())
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
