//! utxodump: dump the UTXO set from a Bitcoin Core chainstate LevelDB.
//!
//! ## Usage
//!
//! ```bash
//! # 1. Stop the node (it holds and rewrites the chainstate while running)
//! bitcoin-cli stop
//!
//! # 2. Work on a copy so the live database is never touched
//! cp -r ~/.bitcoin/chainstate /tmp/chainstate-copy
//!
//! # 3. Dump it
//! utxodump --chainstate-path /tmp/chainstate-copy --format csv
//! ```
//!
//! One line per unspent output: txid, vout, height, amount, coinbase flag,
//! script type, and the compressed script payload.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use clap::Parser;
use tracing::{debug, info, warn};

use utxodump::coin::decode_coin_entry;
use utxodump::config;
use utxodump::output::{OutputFormat, RecordWriter};
use utxodump::store::SnapshotStore;
use utxodump::telemetry::init_tracing;

#[derive(Parser, Debug)]
#[clap(name = "utxodump")]
#[clap(about = "Dump the UTXO set from a chainstate LevelDB snapshot", long_about = None)]
struct Args {
    /// Path to the chainstate directory (default from config.toml, else
    /// ~/.bitcoin/chainstate)
    #[clap(long)]
    chainstate_path: Option<String>,

    /// Output format
    #[clap(long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Stop after this many decoded records
    #[clap(long)]
    limit: Option<u64>,

    /// Skip the check for a running bitcoind
    #[clap(long, default_value_t = false)]
    skip_running_check: bool,

    /// Emit logs as JSON instead of pretty console lines
    #[clap(long, default_value_t = false)]
    log_json: bool,
}

/// A responsive bitcoin-cli means the node is up and holds the chainstate.
fn bitcoind_running() -> bool {
    Command::new("bitcoin-cli")
        .arg("getblockcount")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing("info", args.log_json);

    let config = config::load()?;
    let chainstate_dir = match args.chainstate_path {
        Some(ref path) => shellexpand::tilde(path).to_string(),
        None => config::chainstate_dir(&config),
    };
    let chainstate_path = PathBuf::from(&chainstate_dir);

    if !chainstate_path.exists() {
        return Err(format!(
            "chainstate path does not exist: {}",
            chainstate_path.display()
        )
        .into());
    }

    if !args.skip_running_check && bitcoind_running() {
        return Err("bitcoind appears to be running; shut it down before reading the \
                    chainstate, or pass --skip-running-check"
            .into());
    }

    info!(path = %chainstate_path.display(), "opening chainstate");
    let mut store = SnapshotStore::open(&chainstate_path)?;
    let obfuscation_key = store.obfuscation_key()?;
    debug!(key = %hex::encode(obfuscation_key.as_bytes()), "loaded obfuscation key");

    let stdout = io::stdout();
    let mut writer = RecordWriter::new(BufWriter::new(stdout.lock()), args.format);

    let mut failed: u64 = 0;
    for (key, value) in store.coin_entries()? {
        match decode_coin_entry(&key, &value, &obfuscation_key) {
            Ok(record) => {
                writer.write(&record)?;
                if let Some(limit) = args.limit {
                    if writer.written() >= limit {
                        break;
                    }
                }
            }
            // one bad record never stops the dump
            Err(err) => {
                failed += 1;
                warn!(key = %hex::encode(&key), %err, "failed to decode coin entry");
            }
        }
    }
    writer.flush()?;

    info!(decoded = writer.written(), failed, "chainstate dump complete");
    Ok(())
}
