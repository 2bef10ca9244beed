//! Expansion and compression of densely packed big-endian bit streams.
//!
//! Equihash works on words that are not byte-aligned: collision prefixes are
//! `collision_bit_length` bits wide and wire indices one bit wider. Both are
//! expanded into byte-aligned big-endian words so that the verifier can XOR
//! and compare bytes directly, and so that lexicographic byte comparison
//! coincides with integer comparison.

/// Expands every consecutive `bit_len` bits of `vin` (read big-endian across
/// byte boundaries) into one output word of `(bit_len + 7) / 8 + byte_pad`
/// bytes, with the leading `byte_pad` bytes zero and the value right-aligned.
///
/// Callers must ensure that `8 * vin.len()` is divisible by `bit_len`.
pub(crate) fn expand_array(vin: &[u8], bit_len: usize, byte_pad: usize) -> Vec<u8> {
    assert!(bit_len >= 8);
    assert!(u32::BITS as usize >= 7 + bit_len);

    let out_width = (bit_len + 7) / 8 + byte_pad;
    let out_len = 8 * out_width * vin.len() / bit_len;

    // Shortcut for parameters where expansion is a no-op
    if out_len == vin.len() {
        return vin.to_vec();
    }

    let mut vout = vec![0u8; out_len];
    let bit_len_mask: u32 = (1 << bit_len) - 1;

    // The acc_bits least-significant bits of acc_value represent a bit
    // sequence in big-endian order.
    let mut acc_bits = 0usize;
    let mut acc_value: u32 = 0;

    let mut j = 0;
    for b in vin {
        acc_value = (acc_value << 8) | u32::from(*b);
        acc_bits += 8;

        // Once the accumulator holds a whole word, write it out big-endian,
        // masking bit_len_mask across the byte boundaries.
        if acc_bits >= bit_len {
            acc_bits -= bit_len;
            for x in byte_pad..out_width {
                let shift = 8 * (out_width - x - 1);
                vout[j + x] = ((acc_value >> (acc_bits + shift)) & ((bit_len_mask >> shift) & 0xFF))
                    as u8;
            }
            j += out_width;
        }
    }

    vout
}

/// The inverse of [`expand_array`]: packs the `bit_len` low bits of every
/// `(bit_len + 7) / 8 + byte_pad`-byte input word back into a contiguous
/// big-endian bit stream.
pub(crate) fn compress_array(vin: &[u8], bit_len: usize, byte_pad: usize) -> Vec<u8> {
    assert!(bit_len >= 8);
    assert!(u32::BITS as usize >= 7 + bit_len);

    let in_width = (bit_len + 7) / 8 + byte_pad;
    let out_len = bit_len * vin.len() / (8 * in_width);

    // Shortcut for parameters where compression is a no-op
    if out_len == vin.len() {
        return vin.to_vec();
    }

    let mut vout = vec![0u8; out_len];
    let bit_len_mask: u32 = (1 << bit_len) - 1;

    // The acc_bits least-significant bits of acc_value represent a bit
    // sequence in big-endian order.
    let mut acc_bits = 0usize;
    let mut acc_value: u32 = 0;

    let mut j = 0;
    for out in vout.iter_mut() {
        // Refill the accumulator from the next input word once it holds
        // fewer than a byte's worth of pending bits.
        if acc_bits < 8 {
            acc_value <<= bit_len;
            for x in byte_pad..in_width {
                let shift = 8 * (in_width - x - 1);
                acc_value |= u32::from(vin[j + x] & ((bit_len_mask >> shift) & 0xFF) as u8) << shift;
            }
            j += in_width;
            acc_bits += bit_len;
        }
        acc_bits -= 8;
        *out = ((acc_value >> acc_bits) & 0xFF) as u8;
    }

    vout
}
