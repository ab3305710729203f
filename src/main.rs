use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stockout::config::GameConfig;
use stockout::game::{play_game, Coin};
use stockout::prompt::Console;

#[derive(Parser, Debug)]
#[command(name = "stockout", version, about = "World, Out of Stock: a two-nation color game")]
struct Cli {
    #[arg(long, help = "Config file (default: stockout.toml next to the binary or in CWD)")]
    config: Option<PathBuf>,
    #[arg(long, help = "Seed for the pre-game coin toss")]
    seed: Option<u64>,
    #[arg(long, value_enum, help = "Force the coin instead of tossing it")]
    coin: Option<CoinArg>,
    #[arg(long, help = "Print a JSON summary after the game")]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CoinArg {
    Heads,
    Tails,
}

impl From<CoinArg> for Coin {
    fn from(arg: CoinArg) -> Self {
        match arg {
            CoinArg::Heads => Coin::Heads,
            CoinArg::Tails => Coin::Tails,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => GameConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::load(),
    };

    let coin = match (cli.coin, cli.seed.or(config.rules.seed)) {
        (Some(forced), _) => forced.into(),
        (None, Some(seed)) => Coin::toss(&mut StdRng::seed_from_u64(seed)),
        (None, None) => Coin::toss(&mut rand::thread_rng()),
    };
    info!(%coin, "coin decided");

    let mut console = Console::stdio();
    let summary = play_game(&mut console, &config, coin)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
