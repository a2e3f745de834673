//! Chainstate value deobfuscation.
//!
//! Every value in the chainstate LevelDB is XORed against a short
//! per-database key, cyclically extended to the value's length. XOR is its
//! own inverse, so the same operation both obfuscates and deobfuscates.

/// LevelDB key under which the store records its obfuscation key:
/// `0x0E 0x00 "obfuscate_key"`.
pub const OBFUSCATE_KEY_SENTINEL: &[u8] = b"\x0e\x00obfuscate_key";

/// The store's per-database XOR key.
///
/// Loaded once when the store is opened and passed by reference into every
/// deobfuscation call; never mutated. Guaranteed non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObfuscationKey(Vec<u8>);

impl ObfuscationKey {
    /// Build from the raw sentinel value. The first byte of the stored
    /// value is a length prefix and is stripped; returns `None` when
    /// nothing remains after it.
    pub fn from_raw(raw: &[u8]) -> Option<ObfuscationKey> {
        let key = raw.get(1..)?;
        if key.is_empty() {
            return None;
        }
        Some(ObfuscationKey(key.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Repeat the key until it covers `len` bytes, then truncate the tail.
    fn extended(&self, len: usize) -> Vec<u8> {
        let repeats = (len + self.0.len() - 1) / self.0.len();
        let mut extended = self.0.repeat(repeats);
        extended.truncate(len);
        extended
    }

    /// XOR `value` byte-wise against the extended key.
    pub fn deobfuscate(&self, value: &[u8]) -> Vec<u8> {
        let key = self.extended(value.len());
        value.iter().zip(key.iter()).map(|(v, k)| v ^ k).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_length_prefix() {
        let raw = hex::decode("08b12dcefd8f872536").unwrap();
        let key = ObfuscationKey::from_raw(&raw).unwrap();
        assert_eq!(key.as_bytes(), hex::decode("b12dcefd8f872536").unwrap());
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(ObfuscationKey::from_raw(&[0x00]).is_none());
        assert!(ObfuscationKey::from_raw(&[]).is_none());
    }

    #[test]
    fn key_extension_repeats_then_truncates() {
        let key = ObfuscationKey(vec![0xaa, 0xbb, 0xcc]);
        assert_eq!(
            key.extended(7),
            vec![0xaa, 0xbb, 0xcc, 0xaa, 0xbb, 0xcc, 0xaa]
        );
        assert_eq!(key.extended(3), vec![0xaa, 0xbb, 0xcc]);
        assert_eq!(key.extended(2), vec![0xaa, 0xbb]);
    }

    #[test]
    fn double_xor_is_identity() {
        let key = ObfuscationKey(vec![0xb1, 0x2d, 0xce, 0xfd]);
        for len in [0usize, 1, 4, 7, 27] {
            let value: Vec<u8> = (0..len as u8).collect();
            let once = key.deobfuscate(&value);
            assert_eq!(key.deobfuscate(&once), value, "length {}", len);
        }
    }

    #[test]
    fn known_xor_fixture() {
        let key = ObfuscationKey(hex::decode("b12dcefd8f872536").unwrap());
        let value = hex::decode("71a9e87d62de25953e189f706bcf59263f15de1bf6c893bda9b045").unwrap();
        let plain = key.deobfuscate(&value);
        assert_eq!(
            hex::encode(plain),
            "c0842680ed5900a38f35518de4487c108e3810e6794fb68b189d8b"
        );
    }
}
