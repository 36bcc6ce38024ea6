//! Celery UART - Streams a rotating cube to the Celery3D GPU
//!
//! Usage: `celery-uart [PORT]`, where PORT is a serial device (default
//! `/dev/ttyUSB0`) or `file:<path>` to capture the byte stream instead.

mod settings;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use celery_driver::{frame_bytes, AnimationDriver, CancelToken};
use celery_link::{open_transport, Transport};
use celery_render::CUBE;

use settings::Settings;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let settings = Settings::load().with_port(std::env::args().nth(1));

    info!("Celery3D UART cube demo");
    info!(
        "Resolution {}x{}, {} baud",
        settings.viewport.width, settings.viewport.height, settings.link.baud_rate
    );
    let bytes = frame_bytes(&CUBE);
    info!(
        "{} triangles, {} bytes/frame, ~{:.0} ms on the wire",
        CUBE.triangle_count(),
        bytes,
        settings.link.transfer_time(bytes).as_secs_f64() * 1000.0
    );

    let transport = open_link(&settings)?;

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("Failed to install Ctrl-C handler")?;
    info!("Press Ctrl-C to stop");

    let mut driver = AnimationDriver::new(
        transport,
        settings.driver.clone(),
        &settings.camera,
        settings.viewport,
    );
    let summary = driver.run(&cancel).context("Animation failed")?;

    info!(
        "Total frames: {} ({} bytes, {:.1} FPS average)",
        summary.frames,
        summary.bytes_sent,
        summary.stats.average_fps()
    );
    if summary.skipped_triangles > 0 {
        info!("Skipped {} degenerate triangles", summary.skipped_triangles);
    }
    info!("Transport closed");

    Ok(())
}

/// Open the configured port. Failures are reported once, by the caller.
fn open_link(settings: &Settings) -> Result<Box<dyn Transport>> {
    open_transport(&settings.port, &settings.link)
        .with_context(|| format!("Failed to open {}", settings.port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_failure_names_port() {
        let settings = Settings::default().with_port(Some("/dev/celery-missing".to_string()));
        let err = open_link(&settings).err().unwrap();

        assert_eq!(err.to_string(), "Failed to open /dev/celery-missing");
        assert!(matches!(
            err.downcast_ref::<celery_link::LinkError>(),
            Some(celery_link::LinkError::Open { .. })
        ));
    }

    #[test]
    fn test_open_capture_file() {
        let path = std::env::temp_dir().join(format!("celery-main-{}.bin", std::process::id()));
        let settings = Settings::default().with_port(Some(format!("file:{}", path.display())));

        let mut transport = open_link(&settings).unwrap();
        transport.write_all(&[0x02]).unwrap();
        transport.close().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), vec![0x02]);
        std::fs::remove_file(&path).unwrap();
    }
}
