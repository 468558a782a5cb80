use anyhow::Result;
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, ReversalPolicy};
use grid_snake::logging::init_file_logger;
use grid_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Single-player Snake in the terminal")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board side length
    #[arg(long)]
    board_size: Option<usize>,

    /// Points per food eaten
    #[arg(long)]
    food_reward: Option<u32>,

    /// Milliseconds between ticks
    #[arg(long)]
    speed: Option<u64>,

    /// What a 180-degree turn does
    #[arg(long)]
    reversal: Option<Reversal>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is busy with the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Reversal {
    /// Ignore the turn and keep going
    Ignore,
    /// Turn into your own neck
    Lethal,
}

impl From<Reversal> for ReversalPolicy {
    fn from(reversal: Reversal) -> Self {
        match reversal {
            Reversal::Ignore => ReversalPolicy::Ignore,
            Reversal::Lethal => ReversalPolicy::Lethal,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(board_size) = self.board_size {
            config.board_size = board_size;
        }
        if let Some(food_reward) = self.food_reward {
            config.food_reward = food_reward;
        }
        if let Some(speed) = self.speed {
            config.tick_interval_ms = speed;
        }
        if let Some(reversal) = self.reversal.clone() {
            config.reversal = reversal.into();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logger(path)?;
    }

    let config = cli.game_config()?;
    log::info!("Starting with {:?}", config);

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
