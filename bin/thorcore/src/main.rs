mod batch;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use config::Config;
use thorcore_keeper::{Keeper, MemStore};
use thorcore_txout::TxOutStore;

#[derive(Parser)]
#[clap(about = "Local replay/debug tool for the thorcore state machine")]
struct Cli {
    /// Config file (defaults applied if omitted).
    #[clap(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command
}

#[derive(Subcommand)]
enum Command {
    /// Replay a batch of observed txs against a (possibly pre-existing)
    /// kv-store snapshot, writing the resulting snapshot back out.
    Replay {
        /// Newline-delimited JSON batch file, see `batch::BatchEntry`.
        batch: PathBuf,
        /// kv-store snapshot to load before replay and save after.
        /// Starts empty if the file doesn't exist.
        #[clap(short, long)]
        store: PathBuf
    },
    /// Print every key/value pair in a kv-store snapshot, optionally
    /// restricted to one prefix, for inspection.
    Dump {
        store: PathBuf,
        #[clap(short, long)]
        prefix: Option<String>
    }
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default()
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Command::Replay { batch, store } => run_replay(&config, &batch, &store),
        Command::Dump { store, prefix } => run_dump(&store, prefix.as_deref())
    }
}

fn load_store(path: &std::path::Path) -> eyre::Result<MemStore> {
    if !path.exists() {
        return Ok(MemStore::new());
    }
    let raw = std::fs::read(path)?;
    Ok(bincode::deserialize(&raw)?)
}

fn save_store(path: &std::path::Path, store: &MemStore) -> eyre::Result<()> {
    let bytes = bincode::serialize(store)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn run_replay(config: &Config, batch_path: &std::path::Path, store_path: &std::path::Path) -> eyre::Result<()> {
    let raw = std::fs::read_to_string(batch_path)?;
    let entries = batch::parse_batch(&raw)?;
    tracing::info!(count = entries.len(), "loaded batch");

    let store = load_store(store_path)?;
    let mut keeper = Keeper::new(store);
    let mut txout_store = TxOutStore::new();

    let heights = batch::run_batch(&mut keeper, &mut txout_store, entries, config.default_version_tuple()?)?;

    for height in heights {
        let tx_out = keeper.get_tx_out(height as u64)?;
        for item in &tx_out.items {
            println!("{}", serde_json::to_string(item)?);
        }
    }

    save_store(store_path, keeper.store())?;
    Ok(())
}

fn run_dump(store_path: &std::path::Path, prefix: Option<&str>) -> eyre::Result<()> {
    let store = load_store(store_path)?;
    let prefix = prefix.unwrap_or("");
    for (key, value) in store.entries() {
        if !key.starts_with(prefix) {
            continue;
        }
        println!("{key} ({} bytes)", value.len());
    }
    Ok(())
}
