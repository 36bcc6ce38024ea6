//! Celery Protocol - Command encoding for the Celery3D GPU
//!
//! The GPU's UART front end accepts a flat stream of commands. Each command
//! is a one-byte opcode followed by a payload whose length is fixed by the
//! opcode; there are no delimiters, checksums or length prefixes, so a single
//! missing or extra byte desynchronizes the receiver for the rest of the
//! session. All multi-byte fields are little-endian.

mod color;
mod command;
mod decoder;
mod error;
mod flags;
mod opcode;
mod wire;

pub use color::{pack_rgb565, pack_rgba4444, unpack_rgb565};
pub use command::{encode_indexed_triangles, encode_triangle_list, Command};
pub use decoder::{CommandDecoder, DecodedCommand};
pub use error::ProtocolError;
pub use flags::ConfigFlags;
pub use opcode::Opcode;
pub use wire::WireVertex;
