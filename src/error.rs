use std::fmt;

/// Per-record decoding failure.
///
/// Each variant is unrecoverable for the record in which it occurs: the
/// chainstate is static on disk, so retrying reproduces the same bytes and
/// the same error. Callers decide whether to skip, count, or abort; a bad
/// record never poisons the records after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer ended before a varint's terminating byte was found.
    TruncatedVarint { offset: usize },
    /// The store key is too short to hold the tag byte plus 32-byte txid.
    MalformedKey { len: usize },
    /// The script payload length disagrees with the type-implied length.
    ScriptLengthMismatch {
        script_type: u64,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeError::TruncatedVarint { offset } => {
                write!(f, "truncated varint starting at byte {}", offset)
            }
            DecodeError::MalformedKey { len } => {
                write!(f, "malformed coin key: {} bytes, need at least 33", len)
            }
            DecodeError::ScriptLengthMismatch {
                script_type,
                expected,
                actual,
            } => write!(
                f,
                "script length mismatch for type {}: expected {} bytes, got {}",
                script_type, expected, actual
            ),
        }
    }
}

impl std::error::Error for DecodeError {}
