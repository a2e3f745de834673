//! Chainstate LevelDB access.
//!
//! Opens the snapshot store, surfaces the obfuscation key stored under its
//! sentinel entry, and iterates raw coin entries. All byte-level decoding
//! lives in [`crate::coin`]; this module treats keys and values as opaque
//! apart from the one-byte tag filter.

use std::error::Error;
use std::path::Path;

use rusty_leveldb::{DBIterator, LdbIterator, Options, DB};

use crate::coin::is_coin_key;
use crate::obfuscation::{ObfuscationKey, OBFUSCATE_KEY_SENTINEL};

/// A read-only view of a chainstate LevelDB.
///
/// The store must not be held by a live writer; callers are expected to
/// verify that before opening (the node rewrites the chainstate while it
/// runs).
pub struct SnapshotStore {
    db: DB,
}

impl SnapshotStore {
    pub fn open(path: &Path) -> Result<SnapshotStore, Box<dyn Error>> {
        let opts = Options::default();
        let db = DB::open(path, opts)?;
        Ok(SnapshotStore { db })
    }

    /// Fetch the obfuscation key from the sentinel entry. The first byte
    /// of the stored value is a length prefix and is stripped.
    pub fn obfuscation_key(&mut self) -> Result<ObfuscationKey, Box<dyn Error>> {
        let raw = self
            .db
            .get(OBFUSCATE_KEY_SENTINEL)
            .ok_or("obfuscate_key entry not found in chainstate")?;
        ObfuscationKey::from_raw(&raw).ok_or_else(|| "obfuscate_key entry is empty".into())
    }

    /// Iterate all `C`-prefixed entries in store order. Keys keep their
    /// tag byte; values stay obfuscated.
    pub fn coin_entries(&mut self) -> Result<CoinEntries, Box<dyn Error>> {
        let iter = self.db.new_iter()?;
        Ok(CoinEntries { iter })
    }
}

pub struct CoinEntries {
    iter: DBIterator,
}

impl Iterator for CoinEntries {
    type Item = (Vec<u8>, Vec<u8>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((key, value)) = LdbIterator::next(&mut self.iter) {
            if is_coin_key(&key) {
                return Some((key, value));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::decode_coin_entry;

    /// Seed a LevelDB with a sentinel key, one coin entry, and one
    /// non-coin entry, then decode through the store end to end.
    #[test]
    fn reads_seeded_chainstate() {
        let dir = tempfile::tempdir().unwrap();

        let obfuscation_key =
            ObfuscationKey::from_raw(&hex::decode("04deadbeef").unwrap()).unwrap();

        // height 100, not coinbase; amount 1; type 0; 20-byte hash
        let mut plain = vec![0x80, 0x48, 0x01, 0x00];
        plain.extend_from_slice(&[0x5au8; 20]);

        let mut coin_key = vec![b'C'];
        coin_key.extend_from_slice(&[0x11u8; 32]);
        coin_key.push(0x00);

        let opts = Options::default();
        let mut db = DB::open(dir.path(), opts).unwrap();
        db.put(OBFUSCATE_KEY_SENTINEL, &hex::decode("04deadbeef").unwrap())
            .unwrap();
        db.put(&coin_key, &obfuscation_key.deobfuscate(&plain))
            .unwrap();
        db.put(b"Bheader", b"not a coin").unwrap();
        db.flush().unwrap();

        let mut store = SnapshotStore { db };
        let key = store.obfuscation_key().unwrap();
        assert_eq!(key, obfuscation_key);

        let entries: Vec<_> = store.coin_entries().unwrap().collect();
        assert_eq!(entries.len(), 1);

        let (raw_key, raw_value) = &entries[0];
        let record = decode_coin_entry(raw_key, raw_value, &key).unwrap();
        assert_eq!(record.txid, [0x11u8; 32]);
        assert_eq!(record.height, 100);
        assert_eq!(record.amount, 1);
        assert_eq!(record.script, vec![0x5au8; 20]);
    }

    #[test]
    fn missing_sentinel_is_an_error() {
        // a freshly created, empty store has no sentinel entry
        let dir = tempfile::tempdir().unwrap();
        let mut store = SnapshotStore::open(dir.path()).unwrap();
        assert!(store.obfuscation_key().is_err());
    }
}
