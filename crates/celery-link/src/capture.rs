use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LinkError;
use crate::transport::Transport;

/// Records the command stream to a file instead of a serial port.
///
/// The file holds exactly the bytes the GPU would have received, so it can
/// be replayed to a board later or fed to the stream decoder.
pub struct CaptureTransport {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    written: u64,
}

impl CaptureTransport {
    /// Create (or truncate) the capture file at `path`
    pub fn create(path: &Path) -> Result<Self, LinkError> {
        let file = File::create(path).map_err(|e| LinkError::Capture(path.to_path_buf(), e))?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path: path.to_path_buf(),
            written: 0,
        })
    }

    /// Bytes written so far
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn writer(&mut self) -> Result<&mut BufWriter<File>, LinkError> {
        self.writer.as_mut().ok_or(LinkError::Closed)
    }
}

impl Transport for CaptureTransport {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        self.writer()?.write_all(bytes).map_err(LinkError::Write)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LinkError> {
        self.writer()?.flush().map_err(LinkError::Flush)
    }

    fn close(&mut self) -> Result<(), LinkError> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        writer.flush().map_err(LinkError::Flush)?;
        debug!(
            "Closed capture {:?} after {} bytes",
            self.path, self.written
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("capture file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("celery-{}-{}.bin", name, std::process::id()))
    }

    #[test]
    fn writes_bytes_to_file() {
        let path = temp_path("capture");
        let mut capture = CaptureTransport::create(&path).unwrap();
        capture.write_all(&[0x04, 0x06]).unwrap();
        capture.write_all(&[0x02]).unwrap();
        capture.flush().unwrap();
        assert_eq!(capture.bytes_written(), 3);
        capture.close().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), vec![0x04, 0x06, 0x02]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn closed_capture_rejects_writes() {
        let path = temp_path("closed");
        let mut capture = CaptureTransport::create(&path).unwrap();
        capture.close().unwrap();
        // Second close is harmless
        capture.close().unwrap();
        assert!(matches!(capture.write_all(&[1]), Err(LinkError::Closed)));
        assert!(matches!(capture.flush(), Err(LinkError::Closed)));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn bad_path_fails() {
        let path = Path::new("/nonexistent-dir/celery/capture.bin");
        assert!(matches!(
            CaptureTransport::create(path),
            Err(LinkError::Capture(..))
        ));
    }
}
