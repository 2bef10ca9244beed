//! Verification for the [Equihash] Proof-of-Work function, in the variant
//! used by the Zcash protocol.
//!
//! Equihash is a memory-hard scheme based on the Generalized Birthday
//! Problem, parameterized by a hash word width `n` and a number of collision
//! rounds `k`. A solution is `2^k` indices, packed at
//! `n / (k + 1) + 1` bits each, whose derived hash words XOR-cancel in a
//! prescribed balanced binary tree while remaining pairwise distinct and
//! canonically ordered. This crate checks candidate solutions; it does not
//! produce them.
//!
//! [Equihash]: https://zips.z.cash/protocol/protocol.pdf#equihash

mod engine;
mod minimal;
mod packer;
mod params;
mod row;
mod verify;

#[cfg(test)]
mod test_vectors;

pub use verify::{verify, Error, Verifier, HEADER_LENGTH, K, N, SOLUTION_LENGTH};
