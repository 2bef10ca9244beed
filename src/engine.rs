//! Derivation of the per-index hash words from a personalized BLAKE2b state.

use blake2b_simd::{Hash as Blake2bHash, Params as Blake2bParams, State as Blake2bState};
use byteorder::{LittleEndian, WriteBytesExt};

use crate::params::Params;

/// Domain-separation prefix of the Zcash Equihash personalization.
pub(crate) const POW_TAG: &[u8; 8] = b"ZcashPoW";

/// Builds the base hash state for `(input, nonce)` under an arbitrary
/// personalization prefix. The production surface always uses [`POW_TAG`];
/// the prefix is a parameter so that tests can demonstrate the binding.
pub(crate) fn base_state_with(
    prefix: &[u8; 8],
    p: Params,
    input: &[u8],
    nonce: &[u8],
) -> Blake2bState {
    let mut personalization = Vec::from(&prefix[..]);
    personalization.write_u32::<LittleEndian>(p.n).unwrap();
    personalization.write_u32::<LittleEndian>(p.k).unwrap();

    let mut state = Blake2bParams::new()
        .hash_length(p.hash_output() as usize)
        .personal(&personalization)
        .to_state();
    state.update(input);
    state.update(nonce);
    state
}

/// Base hash state: BLAKE2b personalized with `"ZcashPoW" || le32(n) || le32(k)`,
/// digest length `p.hash_output()`, updated with the input and the nonce.
///
/// The returned state is a snapshot; it is cloned per hash block and never
/// mutated again.
pub(crate) fn base_state(p: Params, input: &[u8], nonce: &[u8]) -> Blake2bState {
    base_state_with(POW_TAG, p, input, nonce)
}

/// Hash block `g`: clone of the base state, updated with `le32(g)`, finalized.
pub(crate) fn index_hash(base_state: &Blake2bState, g: u32) -> Blake2bHash {
    let mut leg = [0u8; 4];
    (&mut leg[..]).write_u32::<LittleEndian>(g).unwrap();

    let mut state = base_state.clone();
    state.update(&leg);
    state.finalize()
}
