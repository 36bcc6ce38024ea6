use std::time::Duration;

use celery_core::Color;
use celery_protocol::{pack_rgb565, ConfigFlags};
use serde::{Deserialize, Serialize};

/// Frame loop configuration. Maps to the `[driver]` table in the settings
/// file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Minimum wall time per frame in milliseconds. 150 ms keeps a ~1.5 KB
    /// frame under the sustained rate of a 115200 baud link.
    pub min_frame_interval_ms: u64,
    /// Pause after opening the transport so the FPGA can finish reset.
    pub startup_delay_ms: u64,
    /// Pause after the SET_CONFIG command.
    pub config_delay_ms: u64,
    /// Framebuffer clear color.
    pub background: Color,
    /// Render state sent once when the loop starts.
    pub render_flags: ConfigFlags,
    /// Stop after this many frames; runs until cancelled when unset.
    pub max_frames: Option<u64>,
    /// Log frame statistics every this many frames (0 disables).
    pub stats_interval: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            min_frame_interval_ms: 150,
            startup_delay_ms: 500,
            config_delay_ms: 10,
            background: Color::rgb(0.1, 0.1, 0.25),
            render_flags: ConfigFlags::depth_only(),
            max_frames: None,
            stats_interval: 10,
        }
    }
}

impl DriverConfig {
    pub fn min_frame_interval(&self) -> Duration {
        Duration::from_millis(self.min_frame_interval_ms)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    pub fn config_delay(&self) -> Duration {
        Duration::from_millis(self.config_delay_ms)
    }

    /// Background as the RGB565 value sent with CLEAR_FB
    pub fn background_rgb565(&self) -> u16 {
        pack_rgb565(self.background.r, self.background.g, self.background.b)
    }

    /// No start-up pauses, for tests and capture runs
    pub fn without_delays(self) -> Self {
        Self {
            startup_delay_ms: 0,
            config_delay_ms: 0,
            ..self
        }
    }
}
