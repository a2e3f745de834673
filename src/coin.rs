//! Coin-entry decoding: the Core-compatible mapping from one chainstate
//! key/value pair to a structured UTXO record.
//!
//! ## Entry layout
//!
//! Key: `'C'` tag byte, 32-byte txid (little-endian on disk), then a
//! varint holding the output index.
//!
//! Value (after deobfuscation): three consecutive varints followed by the
//! script payload.
//!
//! 1. `height << 1 | coinbase` — creation height with the coinbase flag
//!    in the low bit.
//! 2. compressed amount — decompressed via [`crate::amount`].
//! 3. script type — 0/1 are 20-byte hashes (P2PKH/P2SH), 2..=5 are 33-byte
//!    public keys, and anything above 5 carries the raw script length
//!    offset by the number of special types.
//!
//! ## Core parity
//!
//! This matches Bitcoin Core's per-output chainstate format
//! (src/coins.h Coin::Serialize, src/compressor.cpp CompressScript).

use serde::Serialize;

use crate::amount::decompress_amount;
use crate::error::DecodeError;
use crate::obfuscation::ObfuscationKey;
use crate::varint::read_decoded;

/// Key prefix tagging unspent-coin entries.
pub const COIN_PREFIX: u8 = b'C';

/// Script types below this are compressed standard scripts; anything at or
/// above it encodes the raw script length plus this constant.
const SPECIAL_SCRIPT_TYPES: u64 = 6;

/// Whether a raw store key holds a coin entry.
pub fn is_coin_key(key: &[u8]) -> bool {
    key.first() == Some(&COIN_PREFIX)
}

/// Parsed coin key: tag byte, txid, output index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinKey {
    /// Txid in display order (reversed from the on-disk byte order).
    pub txid: [u8; 32],
    pub vout: u64,
}

impl CoinKey {
    /// Split a raw store key into txid and output index.
    pub fn parse(key: &[u8]) -> Result<CoinKey, DecodeError> {
        if key.len() < 33 {
            return Err(DecodeError::MalformedKey { len: key.len() });
        }
        let mut txid = [0u8; 32];
        txid.copy_from_slice(&key[1..33]);
        txid.reverse();
        let (vout, _) = read_decoded(key, 33)?;
        Ok(CoinKey { txid, vout })
    }
}

/// One fully decoded unspent output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinRecord {
    #[serde(serialize_with = "hex_bytes")]
    pub txid: [u8; 32],
    pub vout: u64,
    pub height: u64,
    pub coinbase: bool,
    /// Satoshis.
    pub amount: u64,
    #[serde(rename = "type")]
    pub script_type: u64,
    /// Compressed script payload: hash160 for types 0/1, public key for
    /// types 2..=5, raw script bytes otherwise.
    #[serde(serialize_with = "hex_bytes")]
    pub script: Vec<u8>,
}

fn hex_bytes<T, S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode(bytes.as_ref()))
}

/// Decode one `C` entry into a [`CoinRecord`].
///
/// `key` is the full store key including the tag byte; `value` is the raw,
/// still-obfuscated store value. Either a complete record comes back or a
/// typed error for this record alone.
pub fn decode_coin_entry(
    key: &[u8],
    value: &[u8],
    obfuscation_key: &ObfuscationKey,
) -> Result<CoinRecord, DecodeError> {
    let coin_key = CoinKey::parse(key)?;
    let plain = obfuscation_key.deobfuscate(value);

    let mut cursor = 0usize;

    let (code, used) = read_decoded(&plain, cursor)?;
    cursor += used;
    let height = code >> 1;
    let coinbase = code & 1 == 1;

    let (compressed, used) = read_decoded(&plain, cursor)?;
    cursor += used;
    let amount = decompress_amount(compressed);

    let (script_type, used) = read_decoded(&plain, cursor)?;
    cursor += used;

    // Length policy. Types 2..=5 store the pubkey parity byte in the type
    // varint itself, so the cursor steps back one byte to keep that byte
    // in the payload. This rewind applies to the pubkey types only.
    let expected = match script_type {
        0 | 1 => 20,
        2..=5 => {
            cursor -= 1;
            33
        }
        t => (t - SPECIAL_SCRIPT_TYPES) as usize,
    };

    // The script is everything after the type field; its length must match
    // the policy exactly. This also rejects a type-implied length running
    // past the end of the buffer.
    let script = &plain[cursor..];
    if script.len() != expected {
        return Err(DecodeError::ScriptLengthMismatch {
            script_type,
            expected,
            actual: script.len(),
        });
    }

    Ok(CoinRecord {
        txid: coin_key.txid,
        vout: coin_key.vout,
        height,
        coinbase,
        amount,
        script_type,
        script: script.to_vec(),
    })
}
