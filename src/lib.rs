//! Decode the UTXO set from a Bitcoin Core chainstate LevelDB snapshot.
//!
//! The chainstate holds one entry per unspent transaction output, with
//! values XOR-obfuscated and fields packed through Core's base-128 varint
//! and amount-compression schemes. This crate reverses all of it:
//!
//! - [`varint`] — varint scanning and continuation-biased decoding
//! - [`amount`] — satoshi amount decompression
//! - [`obfuscation`] — per-database XOR key handling
//! - [`coin`] — key/value framing into decoded [`coin::CoinRecord`]s
//! - [`store`] — LevelDB iteration and sentinel-key lookup
//! - [`output`] — CSV / JSON record writers

pub mod amount;
pub mod coin;
pub mod config;
pub mod error;
pub mod obfuscation;
pub mod output;
pub mod store;
pub mod telemetry;
pub mod varint;
