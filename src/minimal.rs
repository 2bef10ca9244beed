//! The minimal (wire) encoding of a solution: `2^k` indices, each packed at
//! `collision_bit_length + 1` bits, big-endian with no padding.

use std::io::Cursor;
use std::mem::size_of;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};

use crate::packer::{compress_array, expand_array};
use crate::params::Params;

/// Unpacks a minimally-encoded solution into its `2^k` indices.
///
/// Returns `None` if `minimal` is not exactly `p.solution_width()` bytes.
pub(crate) fn indices_from_minimal(p: Params, minimal: &[u8]) -> Option<Vec<u32>> {
    if minimal.len() != p.solution_width() {
        return None;
    }

    let c_bit_len = p.collision_bit_length();
    let byte_pad = size_of::<u32>() - ((c_bit_len + 1) + 7) / 8;

    let mut csr = Cursor::new(expand_array(minimal, c_bit_len + 1, byte_pad));
    let mut ret = Vec::with_capacity(p.num_indices());

    // Big-endian so that lexicographic array comparison is equivalent to
    // integer comparison
    while let Ok(i) = csr.read_u32::<BigEndian>() {
        ret.push(i);
    }

    Some(ret)
}

/// Packs `2^k` indices back into the minimal encoding.
///
/// Returns `None` on an index count other than `2^k`, or an index that
/// overflows `collision_bit_length + 1` bits.
pub(crate) fn minimal_from_indices(p: Params, indices: &[u32]) -> Option<Vec<u8>> {
    let c_bit_len = p.collision_bit_length();
    if indices.len() != p.num_indices() {
        return None;
    }
    if indices.iter().any(|i| *i >= 1 << (c_bit_len + 1)) {
        return None;
    }

    let byte_pad = size_of::<u32>() - ((c_bit_len + 1) + 7) / 8;
    let mut array = Vec::with_capacity(indices.len() * size_of::<u32>());
    for i in indices {
        array.write_u32::<BigEndian>(*i).unwrap();
    }

    Some(compress_array(&array, c_bit_len + 1, byte_pad))
}

// Big-endian so that lexicographic array comparison is equivalent to integer
// comparison
pub(crate) fn index_to_bytes(i: u32) -> [u8; 4] {
    let mut bytes = [0u8; 4];
    BigEndian::write_u32(&mut bytes, i);
    bytes
}

#[cfg(test)]
pub(crate) fn index_from_bytes(bytes: &[u8]) -> u32 {
    BigEndian::read_u32(bytes)
}
