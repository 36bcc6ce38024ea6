use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::LinkError;
use crate::transport::Transport;

#[derive(Debug, Default)]
struct MemoryState {
    bytes: Vec<u8>,
    writes: usize,
    flushes: usize,
    closes: usize,
}

/// In-memory transport whose contents stay observable after the transport
/// itself has been moved into a driver.
///
/// Clones share the same buffer. Can be told to fail after a number of
/// writes to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<MemoryState>>,
    fail_after: Option<usize>,
    closed: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write after the first `writes` fail with a broken pipe
    pub fn fail_after_writes(mut self, writes: usize) -> Self {
        self.fail_after = Some(writes);
        self
    }

    /// Everything written so far
    pub fn bytes(&self) -> Vec<u8> {
        self.state.lock().bytes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.state.lock().writes
    }

    pub fn flush_count(&self) -> usize {
        self.state.lock().flushes
    }

    /// How many times any clone was closed
    pub fn close_count(&self) -> usize {
        self.state.lock().closes
    }
}

impl Transport for MemoryTransport {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        if self.closed {
            return Err(LinkError::Closed);
        }
        let mut state = self.state.lock();
        if self.fail_after.is_some_and(|limit| state.writes >= limit) {
            return Err(LinkError::Write(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "injected write failure",
            )));
        }
        state.bytes.extend_from_slice(bytes);
        state.writes += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LinkError> {
        if self.closed {
            return Err(LinkError::Closed);
        }
        self.state.lock().flushes += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), LinkError> {
        if !self.closed {
            self.closed = true;
            self.state.lock().closes += 1;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "memory buffer".to_string()
    }
}
