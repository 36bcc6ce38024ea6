//! Celery Core - Core types and utilities for the Celery3D host driver
//!
//! This crate provides the foundational pieces shared by every other crate:
//! - Mathematical primitives (re-exported from glam, double precision)
//! - Matrix construction helpers with the GPU's clip-space conventions
//! - Q15.16 fixed-point conversion used on the wire
//! - Device-space vertex, color and viewport types

pub mod fixed;
pub mod math;
pub mod types;

pub use glam::{DMat4 as Mat4, DVec2 as Vec2, DVec3 as Vec3, DVec4 as Vec4};
pub use types::{Color, DeviceVertex, Viewport};
