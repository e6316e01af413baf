//! Torus Dodger entry point
//!
//! Loads an optional JSON config, feeds stdin lines to player 0 as raw keys
//! and draws each frame as text (or JSON lines) on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use torus_dodger::GameConfig;
use torus_dodger::platform::{InputReceiver, Scheduler, forward_lines, input_channel};
use torus_dodger::renderer::{JsonLinesRenderer, RenderSink, TextRenderer};
use torus_dodger::sim::GameState;

/// Dodge enemies and grab coins on a wrap-around grid
#[derive(Parser, Debug)]
#[command(name = "torus-dodger", version)]
#[command(about = "Tick-driven chase game on a toroidal grid; type a/w/d/s + Enter to move")]
struct Cli {
    /// JSON config file (defaults are used for anything missing)
    config: Option<PathBuf>,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Grid edge length
    #[arg(long)]
    size: Option<i32>,

    /// Emit one JSON object per frame instead of the ASCII grid
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn game_config(&self) -> torus_dodger::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        Ok(config)
    }
}

async fn play<S: RenderSink>(state: GameState, sink: S, inputs: InputReceiver) -> ExitCode {
    tokio::select! {
        state = Scheduler::new(state, sink).run(inputs) => {
            println!("Final score: {}", state.score);
            ExitCode::SUCCESS
        }
        _ = tokio::signal::ctrl_c() => {
            log::info!("Interrupted");
            ExitCode::SUCCESS
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let state = match cli.game_config().and_then(GameState::new) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Could not set up the game: {}", err);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Torus Dodger starting, seed {}", state.rng_state.seed);

    let (tx, rx) = input_channel();
    // Detached: the process exits without waiting on a pending stdin read
    std::thread::spawn(move || {
        if let Err(err) = forward_lines(std::io::stdin().lock(), 0, tx) {
            log::warn!("Stopped reading input: {}", err);
        }
    });

    if cli.json {
        play(state, JsonLinesRenderer::new(std::io::stdout()), rx).await
    } else {
        play(state, TextRenderer::new(std::io::stdout()), rx).await
    }
}
