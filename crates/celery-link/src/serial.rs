use std::io::Write;

use serialport::SerialPort;
use tracing::debug;

use crate::config::LinkConfig;
use crate::error::LinkError;
use crate::transport::Transport;

/// A UART connection to the GPU board
pub struct SerialTransport {
    port: Option<Box<dyn SerialPort>>,
    name: String,
    baud_rate: u32,
}

impl SerialTransport {
    /// Open `name` at the configured baud rate. Fails immediately if the
    /// port cannot be opened; there is no retry.
    pub fn open(name: &str, config: &LinkConfig) -> Result<Self, LinkError> {
        let port = serialport::new(name, config.baud_rate)
            .timeout(config.read_timeout())
            .open()
            .map_err(|source| LinkError::Open {
                port: name.to_string(),
                source,
            })?;

        Ok(Self {
            port: Some(port),
            name: name.to_string(),
            baud_rate: config.baud_rate,
        })
    }

    fn port(&mut self) -> Result<&mut Box<dyn SerialPort>, LinkError> {
        self.port.as_mut().ok_or(LinkError::Closed)
    }
}

impl Transport for SerialTransport {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        self.port()?.write_all(bytes).map_err(LinkError::Write)
    }

    fn flush(&mut self) -> Result<(), LinkError> {
        self.port()?.flush().map_err(LinkError::Flush)
    }

    fn close(&mut self) -> Result<(), LinkError> {
        let Some(mut port) = self.port.take() else {
            return Ok(());
        };
        port.flush().map_err(LinkError::Flush)?;
        debug!("Closed serial port {}", self.name);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("serial port {} ({} baud)", self.name, self.baud_rate)
    }
}
