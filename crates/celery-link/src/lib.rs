//! Celery Link - Byte transports for the Celery3D GPU
//!
//! The driver only ever writes: there is no acknowledgement channel. A
//! transport accepts bytes, flushes them, and is closed exactly once when
//! the driver stops.

mod capture;
mod config;
mod error;
mod memory;
mod serial;
mod transport;

pub use capture::CaptureTransport;
pub use config::LinkConfig;
pub use error::LinkError;
pub use memory::MemoryTransport;
pub use serial::SerialTransport;
pub use transport::{open_transport, Transport, CAPTURE_PREFIX};
