//! Object space to device space vertex transformation

use celery_core::math::transform_point;
use celery_core::{Color, DeviceVertex, Mat4, Vec2, Vec3, Viewport};

use crate::mesh::MeshTriangle;

/// Scale applied to 1/w before it goes on the wire.
///
/// Keeps the perspective weight in the range the GPU's fixed-point
/// interpolator handles without saturating. Changing it requires a matching
/// RTL change.
pub const W_SCALE: f64 = 16.0;

/// Errors that can occur while transforming a vertex
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("clip-space w is {0}, cannot perform the perspective divide")]
    DegenerateClipW(f64),
}

/// Maps object-space vertices into the GPU's screen space for one viewport
#[derive(Debug, Clone, Copy)]
pub struct VertexTransformer {
    viewport: Viewport,
}

impl VertexTransformer {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Transform a single vertex by `mvp` and map it to screen space.
    ///
    /// Nothing is clipped or culled. Only an exactly zero or non-finite
    /// clip-space w is rejected; tiny values are divided through as-is.
    pub fn transform(
        &self,
        position: Vec3,
        uv: Vec2,
        color: Color,
        mvp: &Mat4,
    ) -> Result<DeviceVertex, TransformError> {
        let clip = transform_point(mvp, position.extend(1.0));

        if clip.w == 0.0 || !clip.w.is_finite() {
            return Err(TransformError::DegenerateClipW(clip.w));
        }

        // Perspective divide
        let inv_w = 1.0 / clip.w;
        let ndc_x = clip.x * inv_w;
        let ndc_y = clip.y * inv_w;
        let ndc_z = clip.z * inv_w;

        let width = self.viewport.width as f64;
        let height = self.viewport.height as f64;

        Ok(DeviceVertex {
            x: (ndc_x + 1.0) * 0.5 * width,
            // Raster origin is top-left
            y: (1.0 - ndc_y) * 0.5 * height,
            z: (ndc_z + 1.0) * 0.5,
            w: inv_w * W_SCALE,
            u: uv.x,
            v: uv.y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        })
    }

    /// Transform all three corners of a mesh triangle.
    ///
    /// Fails as a whole if any corner fails, so a triangle is never emitted
    /// with a missing vertex.
    pub fn transform_triangle(
        &self,
        triangle: &MeshTriangle,
        mvp: &Mat4,
    ) -> Result<[DeviceVertex; 3], TransformError> {
        let [c0, c1, c2] = &triangle.corners;
        Ok([
            self.transform(c0.position, c0.uv, triangle.color, mvp)?,
            self.transform(c1.position, c1.uv, triangle.color, mvp)?,
            self.transform(c2.position, c2.uv, triangle.color, mvp)?,
        ])
    }
}

impl Default for VertexTransformer {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}
