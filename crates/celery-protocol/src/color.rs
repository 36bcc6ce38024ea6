//! 16-bit color packing for clear colors and textures
//!
//! Channels are truncated, never rounded. Inputs are clamped to [0, 1] first,
//! so negative values pack as zero instead of wrapping into neighbouring
//! channels.

fn channel(value: f64, max: u16) -> u16 {
    // NaN survives clamp and then casts to 0
    (value.clamp(0.0, 1.0) * max as f64) as u16
}

/// Pack float RGB (0.0 to 1.0) into RGB565.
pub fn pack_rgb565(r: f64, g: f64, b: f64) -> u16 {
    (channel(r, 31) << 11) | (channel(g, 63) << 5) | channel(b, 31)
}

/// Pack float RGBA (0.0 to 1.0) into RGBA4444.
pub fn pack_rgba4444(r: f64, g: f64, b: f64, a: f64) -> u16 {
    (channel(r, 15) << 12) | (channel(g, 15) << 8) | (channel(b, 15) << 4) | channel(a, 15)
}

/// Expand an RGB565 value back to float channels.
pub fn unpack_rgb565(color: u16) -> [f64; 3] {
    let r = (color >> 11) & 0x1F;
    let g = (color >> 5) & 0x3F;
    let b = color & 0x1F;
    [r as f64 / 31.0, g as f64 / 63.0, b as f64 / 31.0]
}
