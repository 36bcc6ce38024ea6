/// Errors raised while building or parsing the command stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("unknown opcode 0x{0:02X}")]
    UnknownOpcode(u8),

    #[error("config flags 0x{0:02X} set reserved bits")]
    ReservedFlags(u8),

    #[error("stream ends with {pending} bytes of an incomplete command")]
    Truncated { pending: usize },

    #[error("triangle index {index} out of range for {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },
}
