//! Vector and matrix helpers
//!
//! Vector arithmetic (`dot`, `cross`, subtraction, scaling, `length`) comes
//! straight from glam. This module adds the pieces whose exact formulation
//! matters for the GPU: a thresholded normalize and the projection, view and
//! rotation matrices, written out element by element in row-major terms so
//! the values sent to the GPU are reproducible bit for bit.
//!
//! Matrices follow the column-vector convention: `m[row][col]`, points are
//! transformed as `m * p`, and `proj * view * model` composes right to left.

use glam::{DMat4, DVec3, DVec4};

/// Vectors at or below this length are returned unchanged by [`normalize`].
pub const NORMALIZE_EPSILON: f64 = 1e-4;

/// Normalize a vector, returning it untouched when its length is too small to
/// divide by. The result is then not unit length; callers must tolerate that.
pub fn normalize(v: DVec3) -> DVec3 {
    let length = v.length();
    if length > NORMALIZE_EPSILON {
        v * (1.0 / length)
    } else {
        v
    }
}

/// Build a matrix from row-major element arrays.
pub fn from_rows(rows: [[f64; 4]; 4]) -> DMat4 {
    DMat4::from_cols_array_2d(&rows).transpose()
}

/// The identity matrix.
pub fn identity() -> DMat4 {
    DMat4::IDENTITY
}

/// Standard 4x4 product `a * b`.
pub fn multiply(a: &DMat4, b: &DMat4) -> DMat4 {
    *a * *b
}

/// Transform a homogeneous point, `m * v`.
pub fn transform_point(m: &DMat4, v: DVec4) -> DVec4 {
    *m * v
}

/// Right-handed perspective projection producing OpenGL clip space
/// (`z` in `[-w, w]` before the divide).
pub fn perspective(fov_y: f64, aspect: f64, near: f64, far: f64) -> DMat4 {
    let tan_half_fov = (fov_y / 2.0).tan();
    from_rows([
        [1.0 / (aspect * tan_half_fov), 0.0, 0.0, 0.0],
        [0.0, 1.0 / tan_half_fov, 0.0, 0.0],
        [
            0.0,
            0.0,
            -(far + near) / (far - near),
            -(2.0 * far * near) / (far - near),
        ],
        [0.0, 0.0, -1.0, 0.0],
    ])
}

/// Right-handed view matrix looking from `eye` toward `target`.
///
/// Camera-space `z` points back toward the viewer.
pub fn look_at(eye: DVec3, target: DVec3, up: DVec3) -> DMat4 {
    let f = normalize(target - eye);
    let r = normalize(f.cross(up));
    let u = r.cross(f);

    from_rows([
        [r.x, r.y, r.z, -r.dot(eye)],
        [u.x, u.y, u.z, -u.dot(eye)],
        [-f.x, -f.y, -f.z, f.dot(eye)],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Rotation about the X axis by `angle` radians.
pub fn rotate_x(angle: f64) -> DMat4 {
    let (s, c) = angle.sin_cos();
    from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, -s, 0.0],
        [0.0, s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Rotation about the Y axis by `angle` radians.
pub fn rotate_y(angle: f64) -> DMat4 {
    let (s, c) = angle.sin_cos();
    from_rows([
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}
