//! wire/varint.rs
//! Base-128 varints: little-endian 7-bit groups, high bit set on every group but the last.

use crate::constants::MAX_VARINT_LEN;
use crate::wire::types::WireError;

/// Number of bytes `value` occupies as a varint.
pub const fn varint_len(value: u64) -> usize {
    // 1 + floor(bits / 7), with 0 needing one byte
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

pub fn encode_varint(mut value: u64, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Decode one varint from the front of `buf`, returning `(value, consumed)`.
///
/// `offset` is the absolute position of `buf[0]`, used for error context.
/// Bits beyond 64 in a tenth byte are dropped, as other implementations do.
pub fn decode_varint(buf: &[u8], offset: usize) -> Result<(u64, usize), WireError> {
    let mut value: u64 = 0;
    for (i, &byte) in buf.iter().enumerate().take(MAX_VARINT_LEN) {
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    if buf.len() >= MAX_VARINT_LEN {
        Err(WireError::VarintOverflow { offset })
    } else {
        Err(WireError::Truncated { offset: offset + buf.len() })
    }
}

/// int32 and enum values are sign-extended to 64 bits before varint encoding.
#[inline]
pub const fn from_i32(v: i32) -> u64 {
    v as i64 as u64
}

#[inline]
pub const fn from_i64(v: i64) -> u64 {
    v as u64
}
