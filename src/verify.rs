//! The round-by-round collision check over a candidate solution.

use std::fmt;

use blake2b_simd::State as Blake2bState;
use tracing::debug;

use crate::engine;
use crate::minimal::indices_from_minimal;
use crate::params::Params;
use crate::row::StepRow;

/// Hash word width in bits on Zcash mainnet.
pub const N: u32 = 200;
/// Number of collision rounds on Zcash mainnet.
pub const K: u32 = 9;

/// Byte length of a serialized block header: a 108-byte prefix followed by a
/// 32-byte nonce.
pub const HEADER_LENGTH: usize = 140;
const HEADER_PREFIX_LENGTH: usize = 108;

/// Byte length of a minimally-encoded solution at `(N, K) = (200, 9)`.
pub const SOLUTION_LENGTH: usize = 1344;

/// An Equihash solution failed to verify.
#[derive(Debug)]
pub struct Error(pub(crate) Kind);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid solution: {}", self.0)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    InvalidParameters,
    LengthMismatch,
    InvalidCollision,
    OutOfOrder,
    RepeatedIndex,
    NonZeroTerminal,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::InvalidParameters => f.write_str("inconsistent parameters"),
            Kind::LengthMismatch => f.write_str("solution is the wrong length"),
            Kind::InvalidCollision => f.write_str("pair does not collide on the leading bytes"),
            Kind::OutOfOrder => f.write_str("index tree incorrectly ordered"),
            Kind::RepeatedIndex => f.write_str("merged subtrees share an index"),
            Kind::NonZeroTerminal => f.write_str("final hash region is non-zero"),
        }
    }
}

/// A solution verifier for one Equihash parameterization.
#[derive(Clone, Copy, Debug)]
pub struct Verifier {
    params: Params,
}

impl Verifier {
    /// Constructs a verifier for parameters `(n, k)`, rejecting combinations
    /// the algorithm is not defined over.
    pub fn new(n: u32, k: u32) -> Result<Self, Error> {
        Params::new(n, k)
            .map(|params| Verifier { params })
            .ok_or(Error(Kind::InvalidParameters))
    }

    /// Checks whether `soln` is a valid minimally-encoded solution for
    /// `(input, nonce)`.
    pub fn validate_solution(&self, input: &[u8], nonce: &[u8], soln: &[u8]) -> Result<(), Error> {
        let state = engine::base_state(self.params, input, nonce);
        validate_with_state(self.params, &state, soln)
    }
}

fn validate_pair(p: Params, a: &StepRow, b: &StepRow) -> Result<(), Kind> {
    if !a.has_collision(b, p.collision_byte_length()) {
        Err(Kind::InvalidCollision)
    } else if b.indices_before(a) {
        Err(Kind::OutOfOrder)
    } else if !a.distinct_indices(b) {
        Err(Kind::RepeatedIndex)
    } else {
        Ok(())
    }
}

pub(crate) fn validate_with_state(
    p: Params,
    state: &Blake2bState,
    soln: &[u8],
) -> Result<(), Error> {
    let indices = indices_from_minimal(p, soln).ok_or(Error(Kind::LengthMismatch))?;

    let mut rows: Vec<StepRow> = indices
        .iter()
        .map(|i| StepRow::leaf(p, state, *i))
        .collect();

    // k rounds of pairwise merging. Pairs are taken in input order, which is
    // also canonical order, so each pair is a pair of sibling subtrees.
    while rows.len() > 1 {
        let mut merged = Vec::with_capacity(rows.len() / 2);
        for pair in rows.chunks(2) {
            let (a, b) = (&pair[0], &pair[1]);
            validate_pair(p, a, b).map_err(Error)?;
            merged.push(StepRow::merge(a, b, p.collision_byte_length()));
        }
        rows = merged;
    }

    debug_assert_eq!(rows.len(), 1);

    // Each round trimmed the colliding prefix, so only the surviving bytes
    // need to be zero.
    if rows[0].is_zero(p.collision_byte_length()) {
        Ok(())
    } else {
        Err(Error(Kind::NonZeroTerminal))
    }
}

/// Checks `soln` against the Zcash mainnet parameters `(200, 9)` for the
/// given serialized block header.
///
/// Returns `true` iff `soln` is exactly [`SOLUTION_LENGTH`] bytes and every
/// collision-tree check passes; the rejection reason is reported at `debug`
/// level.
pub fn verify(header: &[u8; HEADER_LENGTH], soln: &[u8]) -> bool {
    let (prefix, nonce) = header.split_at(HEADER_PREFIX_LENGTH);
    match Verifier::new(N, K).and_then(|v| v.validate_solution(prefix, nonce, soln)) {
        Ok(()) => true,
        Err(err) => {
            debug!("{}", err);
            false
        }
    }
}
