//! Celery Driver - The animation loop for the Celery3D GPU
//!
//! Ties the pieces together: every frame the cube's model matrix is rebuilt
//! from the frame counter, its twelve triangles are transformed to screen
//! space and encoded, and the resulting bytes go out over the transport. The
//! loop is paced so the UART is never asked for more than it can carry.

mod cancel;
mod config;
mod driver;
mod error;
mod pacing;
mod state;

pub use cancel::CancelToken;
pub use config::DriverConfig;
pub use driver::{frame_bytes, AnimationDriver, RunSummary};
pub use error::DriverError;
pub use pacing::{Clock, FramePacer, FrameStats, ManualClock, SystemClock};
pub use state::{DriverState, StopReason};
