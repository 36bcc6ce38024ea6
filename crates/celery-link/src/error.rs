use std::path::PathBuf;

/// Errors that can occur on a transport.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("failed to open serial port '{port}': {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("failed to create capture file '{0}': {1}")]
    Capture(PathBuf, #[source] std::io::Error),

    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),

    #[error("flush failed: {0}")]
    Flush(#[source] std::io::Error),

    #[error("transport is closed")]
    Closed,
}
