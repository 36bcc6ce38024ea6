//! Camera setup and per-frame model animation

use std::f64::consts::TAU;

use celery_core::math::{self, look_at, perspective, rotate_x, rotate_y};
use celery_core::{Mat4, Vec3, Viewport};
use serde::{Deserialize, Serialize};

/// Frames per full revolution of the cube
pub const ROTATION_PERIOD: u64 = 60;

/// X-axis spin relative to the Y-axis spin
pub const X_SPIN_RATIO: f64 = 0.7;

/// Camera placement and projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Fixed view and projection matrices for a camera and viewport
#[derive(Clone, Copy, Debug)]
pub struct Scene {
    /// View matrix (camera)
    pub view: Mat4,
    /// Projection matrix
    pub projection: Mat4,
}

impl Scene {
    pub fn new(camera: &CameraConfig, viewport: Viewport) -> Self {
        let fov_y = camera.fov_y_degrees * std::f64::consts::PI / 180.0;
        Self {
            view: look_at(camera.eye, camera.target, camera.up),
            projection: perspective(fov_y, viewport.aspect(), camera.near, camera.far),
        }
    }

    /// Compose `projection * view * model`
    pub fn mvp(&self, model: &Mat4) -> Mat4 {
        let model_view = math::multiply(&self.view, model);
        math::multiply(&self.projection, &model_view)
    }
}

/// Rotation phase for a frame, one revolution every [`ROTATION_PERIOD`] frames
pub fn rotation_angle(frame: u64) -> f64 {
    (frame % ROTATION_PERIOD) as f64 / ROTATION_PERIOD as f64 * TAU
}

/// Model matrix for a frame: spin about Y, then a slower spin about X
pub fn model_matrix(frame: u64) -> Mat4 {
    let angle = rotation_angle(frame);
    math::multiply(&rotate_y(angle), &rotate_x(angle * X_SPIN_RATIO))
}
