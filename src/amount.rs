//! Amount decompression, matching Bitcoin Core's DecompressAmount
//! (src/compressor.cpp).
//!
//! Core stores satoshi amounts through a transformation that maps common
//! round numbers (multiples of powers of ten) to smaller integers before
//! varint-encoding them. Amounts are exact integer satoshi counts, so this
//! inverse must match bit for bit.

/// Decompress a decoded varint into a satoshi amount.
pub fn decompress_amount(x: u64) -> u64 {
    // 0 is the distinguished "no value" case
    if x == 0 {
        return 0;
    }
    let mut x = x - 1;
    // x = 10*(9*n + d - 1) + e, or x = 9*n + e - 1 when e == 9
    let e = x % 10;
    x /= 10;
    // wrapping multiplication mirrors Core's unchecked uint64 math when
    // the input is corrupt
    let mut n = if e < 9 {
        let d = x % 9;
        x /= 9;
        x.wrapping_mul(10).wrapping_add(d + 1)
    } else {
        x.wrapping_add(1)
    };
    for _ in 0..e {
        n = n.wrapping_mul(10);
    }
    n
}
