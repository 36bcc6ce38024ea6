//! Q15.16 fixed-point conversion
//!
//! Every vertex attribute crosses the wire as a signed Q15.16 value packed in
//! a raw 32-bit word. Conversion truncates toward zero and wraps on overflow;
//! the GPU's parser relies on exactly this behaviour.

/// Number of fractional bits in the wire format.
pub const FRAC_BITS: u32 = 16;

/// The value 1.0 in fixed-point units.
pub const ONE: f64 = (1u32 << FRAC_BITS) as f64;

const WRAP: f64 = 4_294_967_296.0;

/// Convert a real value to its Q15.16 bit pattern.
///
/// Truncates toward zero and keeps the low 32 bits of the result, so values
/// outside the representable range wrap rather than saturate. Non-finite
/// inputs encode as zero.
pub fn encode(value: f64) -> u32 {
    let scaled = (value * ONE).trunc();
    if !scaled.is_finite() {
        return 0;
    }
    scaled.rem_euclid(WRAP) as u32
}

/// Interpret a 32-bit word as a signed Q15.16 value.
pub fn decode(bits: u32) -> f64 {
    bits as i32 as f64 / ONE
}
