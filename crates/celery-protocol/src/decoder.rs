//! Receiver-side parser for the command stream.
//!
//! Mirrors what the GPU's UART front end does: read an opcode, then read the
//! fixed payload length that opcode implies. Used to inspect capture files
//! and to check that the encoder produces a stream the GPU can frame.

use tracing::debug;

use crate::error::ProtocolError;
use crate::opcode::Opcode;
use crate::wire::WireVertex;

/// A command recovered from the byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedCommand {
    ClearFramebuffer(u16),
    ClearDepth,
    /// Raw flag byte, reserved bits included
    SetConfig(u8),
    Triangle([WireVertex; 3]),
}

impl DecodedCommand {
    pub fn opcode(&self) -> Opcode {
        match self {
            DecodedCommand::ClearFramebuffer(_) => Opcode::ClearFramebuffer,
            DecodedCommand::ClearDepth => Opcode::ClearDepth,
            DecodedCommand::SetConfig(_) => Opcode::SetConfig,
            DecodedCommand::Triangle(_) => Opcode::Triangle,
        }
    }
}

/// Incremental decoder that accepts bytes in arbitrary chunks
#[derive(Debug, Default)]
pub struct CommandDecoder {
    buffer: Vec<u8>,
    /// Start of the unconsumed bytes in `buffer`
    pos: usize,
}

impl CommandDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append received bytes
    pub fn push(&mut self, bytes: &[u8]) {
        // Drop the consumed prefix once it outweighs what is still pending
        if self.pos > 0 && self.pos >= self.buffer.len() - self.pos {
            self.buffer.drain(..self.pos);
            self.pos = 0;
        }
        self.buffer.extend_from_slice(bytes);
    }

    /// Bytes received but not yet consumed by a complete command
    pub fn pending(&self) -> usize {
        self.buffer.len() - self.pos
    }

    /// Decode the next complete command, if one is buffered.
    ///
    /// An unknown opcode byte is consumed and reported so the caller can
    /// decide whether to keep going; the stream is desynchronized from that
    /// point on.
    pub fn next_command(&mut self) -> Option<Result<DecodedCommand, ProtocolError>> {
        let (result, consumed) = parse_command(&self.buffer[self.pos..])?;
        self.pos += consumed;
        Some(result)
    }

    /// Decode a complete stream, failing on the first unknown opcode or on
    /// a truncated trailing command.
    pub fn decode_all(bytes: &[u8]) -> Result<Vec<DecodedCommand>, ProtocolError> {
        let mut commands = Vec::new();
        let mut rest = bytes;
        while let Some((result, consumed)) = parse_command(rest) {
            commands.push(result?);
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            return Err(ProtocolError::Truncated {
                pending: rest.len(),
            });
        }
        Ok(commands)
    }
}

/// Parse one command from the front of `bytes`.
///
/// Returns the result and the number of bytes it consumed, or `None` when
/// the command is not complete yet. An unknown opcode consumes one byte.
fn parse_command(bytes: &[u8]) -> Option<(Result<DecodedCommand, ProtocolError>, usize)> {
    let &first = bytes.first()?;
    let opcode = match Opcode::try_from(first) {
        Ok(opcode) => opcode,
        Err(e) => {
            debug!("Dropping unknown opcode byte 0x{:02X}", first);
            return Some((Err(e), 1));
        }
    };

    let len = opcode.command_len();
    let payload = bytes.get(1..len)?;
    let command = match opcode {
        Opcode::ClearFramebuffer => {
            DecodedCommand::ClearFramebuffer(u16::from_le_bytes([payload[0], payload[1]]))
        }
        Opcode::ClearDepth => DecodedCommand::ClearDepth,
        Opcode::SetConfig => DecodedCommand::SetConfig(payload[0]),
        Opcode::Triangle => DecodedCommand::Triangle(std::array::from_fn(|i| {
            let start = i * WireVertex::SIZE;
            bytemuck::pod_read_unaligned(&payload[start..start + WireVertex::SIZE])
        })),
    };
    Some((Ok(command), len))
}
