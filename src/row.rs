//! The working element of the collision tree.

use blake2b_simd::State as Blake2bState;

use crate::engine;
use crate::minimal::index_to_bytes;
use crate::packer::expand_array;
use crate::params::Params;

/// One row of the collision tree: a hash region of `hash_len` bytes followed
/// by the contributing indices, 4 bytes each in big-endian form.
///
/// A row at level `l` of the tree covers `2^l` indices and carries
/// `hash_length - l * collision_byte_length` hash bytes; its index region is
/// in canonical order, with the lexicographically smaller subtree first.
pub(crate) struct StepRow {
    bytes: Vec<u8>,
    hash_len: usize,
}

impl StepRow {
    /// Builds the leaf row for index `i`: the expanded form of hash word `i`
    /// with `i` itself appended.
    pub(crate) fn leaf(p: Params, base_state: &Blake2bState, i: u32) -> Self {
        let digest = engine::index_hash(base_state, i / p.indices_per_hash_output());
        let start = ((i % p.indices_per_hash_output()) * p.n / 8) as usize;
        let end = start + (p.n as usize) / 8;

        let mut bytes = expand_array(&digest.as_bytes()[start..end], p.collision_bit_length(), 0);
        bytes.extend_from_slice(&index_to_bytes(i));

        StepRow {
            bytes,
            hash_len: p.hash_length(),
        }
    }

    fn hash_region(&self) -> &[u8] {
        &self.bytes[..self.hash_len]
    }

    fn index_region(&self) -> &[u8] {
        &self.bytes[self.hash_len..]
    }

    /// Two rows collide if the first `len` bytes of their hash regions agree.
    pub(crate) fn has_collision(&self, other: &StepRow, len: usize) -> bool {
        self.bytes[..len] == other.bytes[..len]
    }

    /// Indices are serialized in big-endian so that lexicographic comparison
    /// of the raw index regions is equivalent to comparing the index
    /// sequences as integers.
    pub(crate) fn indices_before(&self, other: &StepRow) -> bool {
        self.index_region() < other.index_region()
    }

    /// Whether the two rows' index sets are disjoint.
    pub(crate) fn distinct_indices(&self, other: &StepRow) -> bool {
        for i in self.index_region().chunks_exact(4) {
            for j in other.index_region().chunks_exact(4) {
                if i == j {
                    return false;
                }
            }
        }
        true
    }

    /// Merges two colliding siblings into their parent row: the XOR of the
    /// hash regions with the leading `trim` bytes dropped, then both index
    /// regions in canonical order.
    ///
    /// Only called after collision, ordering, and distinctness have been
    /// verified; the trimmed bytes are zero by the collision check.
    pub(crate) fn merge(a: &StepRow, b: &StepRow, trim: usize) -> Self {
        let hash_len = a.hash_len - trim;
        let mut bytes = Vec::with_capacity(hash_len + 2 * a.index_region().len());
        bytes.extend(
            a.hash_region()
                .iter()
                .zip(b.hash_region().iter())
                .skip(trim)
                .map(|(a, b)| a ^ b),
        );

        let (first, second) = if a.indices_before(b) { (a, b) } else { (b, a) };
        bytes.extend_from_slice(first.index_region());
        bytes.extend_from_slice(second.index_region());

        StepRow { bytes, hash_len }
    }

    /// Whether the first `len` hash bytes are all zero.
    pub(crate) fn is_zero(&self, len: usize) -> bool {
        self.bytes[..len].iter().all(|v| *v == 0)
    }
}
