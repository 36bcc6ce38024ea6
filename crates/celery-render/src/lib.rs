//! Celery Render - Host-side transform and lighting for the Celery3D GPU
//!
//! The GPU only rasterizes screen-space triangles, so everything up to the
//! perspective divide happens here: the built-in cube mesh, the camera and
//! projection matrices, and the per-vertex mapping into device space.

pub mod mesh;
pub mod scene;
pub mod vertex;

pub use mesh::{Mesh, MeshTriangle, MeshVertex, CUBE};
pub use scene::{CameraConfig, Scene};
pub use vertex::{TransformError, VertexTransformer};
