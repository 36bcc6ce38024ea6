use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Serial line parameters. Maps to the `[link]` table in the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Line rate in bits per second; must match the GPU's UART.
    pub baud_rate: u32,
    /// Read timeout handed to the serial driver, in milliseconds.
    pub read_timeout_ms: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            read_timeout_ms: 1000,
        }
    }
}

impl LinkConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Payload bytes per second with 8N1 framing (10 bits per byte).
    pub fn bytes_per_second(&self) -> u32 {
        self.baud_rate / 10
    }

    /// Time the line needs to shift out `bytes` bytes.
    pub fn transfer_time(&self, bytes: usize) -> Duration {
        let rate = self.bytes_per_second().max(1) as f64;
        Duration::from_secs_f64(bytes as f64 / rate)
    }
}
