use crate::error::ProtocolError;
use crate::wire::WireVertex;

/// Command opcodes understood by the GPU
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Fill the framebuffer with an RGB565 color
    ClearFramebuffer = 0x01,
    /// Reset the depth buffer to the far plane
    ClearDepth = 0x02,
    /// Rasterize one screen-space triangle
    Triangle = 0x03,
    /// Replace the render state flags
    SetConfig = 0x04,
}

impl Opcode {
    pub const ALL: [Opcode; 4] = [
        Opcode::ClearFramebuffer,
        Opcode::ClearDepth,
        Opcode::Triangle,
        Opcode::SetConfig,
    ];

    /// Number of payload bytes that follow this opcode
    pub const fn payload_len(self) -> usize {
        match self {
            Opcode::ClearFramebuffer => 2,
            Opcode::ClearDepth => 0,
            Opcode::Triangle => 3 * WireVertex::SIZE,
            Opcode::SetConfig => 1,
        }
    }

    /// Total size of the command including the opcode byte
    pub const fn command_len(self) -> usize {
        1 + self.payload_len()
    }

    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::ClearFramebuffer => "CLEAR_FB",
            Opcode::ClearDepth => "CLEAR_DEPTH",
            Opcode::Triangle => "TRIANGLE",
            Opcode::SetConfig => "SET_CONFIG",
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ProtocolError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x01 => Ok(Opcode::ClearFramebuffer),
            0x02 => Ok(Opcode::ClearDepth),
            0x03 => Ok(Opcode::Triangle),
            0x04 => Ok(Opcode::SetConfig),
            other => Err(ProtocolError::UnknownOpcode(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_lengths_match_wire_table() {
        assert_eq!(Opcode::ClearFramebuffer.command_len(), 3);
        assert_eq!(Opcode::ClearDepth.command_len(), 1);
        assert_eq!(Opcode::Triangle.command_len(), 121);
        assert_eq!(Opcode::SetConfig.command_len(), 2);
    }

    #[test]
    fn byte_conversion() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::try_from(op.as_byte()), Ok(op));
        }
        assert_eq!(Opcode::try_from(0x00), Err(ProtocolError::UnknownOpcode(0x00)));
        assert_eq!(Opcode::try_from(0x05), Err(ProtocolError::UnknownOpcode(0x05)));
    }
}
