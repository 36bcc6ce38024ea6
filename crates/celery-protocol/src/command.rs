use celery_core::DeviceVertex;

use crate::error::ProtocolError;
use crate::flags::ConfigFlags;
use crate::opcode::Opcode;
use crate::wire::WireVertex;

/// A single GPU command, ready to be serialized
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Clear the framebuffer to an RGB565 color
    ClearFramebuffer(u16),
    /// Clear the depth buffer
    ClearDepth,
    /// Replace the render state flags
    SetConfig(ConfigFlags),
    /// Draw one triangle
    Triangle([DeviceVertex; 3]),
}

impl Command {
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::ClearFramebuffer(_) => Opcode::ClearFramebuffer,
            Command::ClearDepth => Opcode::ClearDepth,
            Command::SetConfig(_) => Opcode::SetConfig,
            Command::Triangle(_) => Opcode::Triangle,
        }
    }

    /// Exact number of bytes this command occupies on the wire
    pub fn encoded_len(&self) -> usize {
        self.opcode().command_len()
    }

    /// Append the command's wire bytes to `out`
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.reserve(self.encoded_len());
        out.push(self.opcode().as_byte());
        match self {
            Command::ClearFramebuffer(color) => out.extend_from_slice(&color.to_le_bytes()),
            Command::ClearDepth => {}
            Command::SetConfig(flags) => out.push(flags.bits()),
            Command::Triangle(vertices) => {
                for vertex in vertices {
                    out.extend_from_slice(WireVertex::from_vertex(vertex).as_bytes());
                }
            }
        }
    }

    /// The command's wire bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out
    }
}

/// Encode consecutive vertex triples as triangle commands.
///
/// Trailing vertices that do not make up a whole triangle are ignored.
pub fn encode_triangle_list(vertices: &[DeviceVertex], out: &mut Vec<u8>) -> usize {
    let mut count = 0;
    for tri in vertices.chunks_exact(3) {
        Command::Triangle([tri[0], tri[1], tri[2]]).encode_into(out);
        count += 1;
    }
    count
}

/// Encode an indexed triangle list.
///
/// Trailing indices that do not make up a whole triangle are ignored, like
/// [`encode_triangle_list`]. Every index that is used is validated before
/// anything is written, so on error `out` is left untouched.
pub fn encode_indexed_triangles(
    vertices: &[DeviceVertex],
    indices: &[u16],
    out: &mut Vec<u8>,
) -> Result<usize, ProtocolError> {
    let whole = indices.len() - indices.len() % 3;
    let used = &indices[..whole];
    if let Some(&bad) = used.iter().find(|&&i| i as usize >= vertices.len()) {
        return Err(ProtocolError::IndexOutOfRange {
            index: bad as usize,
            len: vertices.len(),
        });
    }

    let mut count = 0;
    for tri in used.chunks_exact(3) {
        Command::Triangle([
            vertices[tri[0] as usize],
            vertices[tri[1] as usize],
            vertices[tri[2] as usize],
        ])
        .encode_into(out);
        count += 1;
    }
    Ok(count)
}
