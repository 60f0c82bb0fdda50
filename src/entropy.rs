//! Uniform random draws of a fixed bit width.

use rand::Rng;

/// The bit width of a GUID's source and check values.
pub const SOURCE_BITS: u32 = 60;

/// Draws a uniform random value from the half-open range `[0, 2^bits)`.
///
/// `bits` of zero always yields zero, and widths of 64 or more cover the
/// full `u64` range. The underlying generator is [`rand::thread_rng`], which
/// is not a hardened entropy source; magic numbers drawn from it are
/// watermarks, not keys.
pub fn draw(bits: u32) -> u64 {
    let mut rng = rand::thread_rng();
    match bits {
        0 => 0,
        64.. => rng.gen_range(0..=u64::MAX),
        _ => rng.gen_range(0..(1u64 << bits)),
    }
}
