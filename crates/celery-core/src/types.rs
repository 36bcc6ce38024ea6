//! Core types shared by the transform, protocol and driver crates

use serde::{Deserialize, Serialize};

/// Framebuffer dimensions of the target GPU, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        // Must match SCREEN_WIDTH/SCREEN_HEIGHT in the RTL
        Self {
            width: 64,
            height: 64,
        }
    }
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Check whether a screen-space point lies inside the framebuffer
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64
    }
}

/// RGBA color with floating point components (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    /// Create a color from RGB values (alpha = 1.0)
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA values
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Replace the alpha component
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Convert to an array [r, g, b, a]
    pub fn to_array(&self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A vertex after transformation, in the GPU's screen space.
///
/// Field order matches the order of the ten words in a triangle vertex
/// record on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceVertex {
    /// Screen X in pixels, not yet rounded
    pub x: f64,
    /// Screen Y in pixels, origin at the top-left
    pub y: f64,
    /// Depth, 0.0 at the near plane and 1.0 at the far plane
    pub z: f64,
    /// Scaled 1/w used for perspective-correct interpolation
    pub w: f64,
    pub u: f64,
    pub v: f64,
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl DeviceVertex {
    /// Number of scalar attributes carried per vertex
    pub const ATTRIBUTE_COUNT: usize = 10;

    /// All attributes in wire order
    pub fn attributes(&self) -> [f64; Self::ATTRIBUTE_COUNT] {
        [
            self.x, self.y, self.z, self.w, self.u, self.v, self.r, self.g, self.b, self.a,
        ]
    }

    /// Rebuild a vertex from attributes in wire order
    pub fn from_attributes(values: [f64; Self::ATTRIBUTE_COUNT]) -> Self {
        let [x, y, z, w, u, v, r, g, b, a] = values;
        Self {
            x,
            y,
            z,
            w,
            u,
            v,
            r,
            g,
            b,
            a,
        }
    }

    /// The vertex color
    pub fn color(&self) -> Color {
        Color::rgba(self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_defaults() {
        let viewport = Viewport::default();
        assert_eq!(viewport, Viewport::new(64, 64));
        assert_eq!(viewport.aspect(), 1.0);
    }

    #[test]
    fn test_viewport_contains_is_half_open() {
        let viewport = Viewport::new(64, 32);
        assert!(viewport.contains(0.0, 0.0));
        assert!(viewport.contains(63.99, 31.99));
        assert!(!viewport.contains(64.0, 10.0));
        assert!(!viewport.contains(10.0, 32.0));
        assert!(!viewport.contains(-0.01, 10.0));
    }

    #[test]
    fn test_color_alpha_defaults_to_opaque() {
        assert_eq!(Color::rgb(0.1, 0.2, 0.3).a, 1.0);
        assert_eq!(Color::rgb(0.1, 0.2, 0.3).with_alpha(0.5).a, 0.5);
    }

    #[test]
    fn test_vertex_attribute_order() {
        let vertex = DeviceVertex::from_attributes([
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0,
        ]);
        assert_eq!(vertex.x, 1.0);
        assert_eq!(vertex.w, 4.0);
        assert_eq!(vertex.u, 5.0);
        assert_eq!(vertex.a, 10.0);
        assert_eq!(vertex.attributes()[6], 7.0);
        assert_eq!(vertex.color(), Color::rgba(7.0, 8.0, 9.0, 10.0));
    }
}
