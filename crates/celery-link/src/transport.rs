use std::path::Path;

use tracing::info;

use crate::capture::CaptureTransport;
use crate::config::LinkConfig;
use crate::error::LinkError;
use crate::serial::SerialTransport;

/// Identifier prefix that selects a capture file instead of a serial port
pub const CAPTURE_PREFIX: &str = "file:";

/// A write-only byte sink connected to the GPU.
///
/// Writes block until the bytes are accepted. After `close` every further
/// call fails with [`LinkError::Closed`]; closing twice is a no-op.
pub trait Transport {
    /// Write all of `bytes`
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), LinkError>;

    /// Push buffered bytes out to the device
    fn flush(&mut self) -> Result<(), LinkError>;

    /// Flush and release the underlying handle
    fn close(&mut self) -> Result<(), LinkError>;

    /// Human-readable name for logs
    fn describe(&self) -> String;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        (**self).write_all(bytes)
    }

    fn flush(&mut self) -> Result<(), LinkError> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<(), LinkError> {
        (**self).close()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Open the transport named by `identifier`.
///
/// `file:<path>` writes the stream to a capture file; anything else is a
/// serial port name such as `/dev/ttyUSB0` or `COM3`.
pub fn open_transport(
    identifier: &str,
    config: &LinkConfig,
) -> Result<Box<dyn Transport>, LinkError> {
    let transport: Box<dyn Transport> = match identifier.strip_prefix(CAPTURE_PREFIX) {
        Some(path) => Box::new(CaptureTransport::create(Path::new(path))?),
        None => Box::new(SerialTransport::open(identifier, config)?),
    };
    info!("Opened {}", transport.describe());
    Ok(transport)
}
