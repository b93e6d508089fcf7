//! Bulk Load Binary
//!
//! Simulates Euchre games and persists each one, parents and leaves, in a
//! single transaction per game.
//!
//! Options: --url, --games, --seed, --strategy, --migrate, --dry-run

use clap::Parser;
use euchre_store::store::*;
use euchre_store::synthetic::Simulator;
use euchre_store::*;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, env = "DB_URL", help = "PostgreSQL connection string")]
    url: Option<String>,
    #[arg(long, default_value_t = 1, help = "Games to simulate and load")]
    games: usize,
    #[arg(long, help = "Seed for the game simulator")]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = Strategy::Stream)]
    strategy: Strategy,
    #[arg(long, help = "Create missing tables before loading")]
    migrate: bool,
    #[arg(long, help = "Load into an in-memory store instead of PostgreSQL")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log()?;
    let args = Args::parse();
    let cancel = CancellationToken::new();
    interrupt(cancel.clone());
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut simulator = Simulator::new(seed);
    let loader = Loader::default().strategy(args.strategy);
    let mut total = Receipt::default();
    log::info!("loading {} games (seed {}, {} strategy)", args.games, seed, args.strategy);
    match args.dry_run {
        true => {
            let memory = Memory::new();
            for _ in 0..args.games {
                let graph = simulator.game();
                match loader.load(memory.begin(), graph, &cancel).await {
                    Ok(receipt) => total.merge(receipt),
                    Err(failure) if failure.is_cancelled() => break,
                    Err(failure) => return Err(failure.into()),
                }
            }
            log::info!("memory store holds {} rows", memory.total());
        }
        false => {
            let url = args
                .url
                .ok_or_else(|| anyhow::anyhow!("--url or DB_URL is required"))?;
            let mut client = connect(&url).await?;
            if args.migrate {
                migrate(&client).await?;
            }
            for _ in 0..args.games {
                let graph = simulator.game();
                let txn = client.transaction().await?;
                match loader.load(txn, graph, &cancel).await {
                    Ok(receipt) => total.merge(receipt),
                    Err(failure) if failure.is_cancelled() => break,
                    Err(failure) => return Err(failure.into()),
                }
            }
        }
    }
    log::info!("done: {}", total);
    Ok(())
}
