use bytemuck::{Pod, Zeroable};
use celery_core::{fixed, DeviceVertex};

/// A triangle vertex record as it travels on the wire: ten Q15.16 words in
/// the order x, y, z, w, u, v, r, g, b, a.
///
/// Words are stored already converted to little-endian, so the struct's raw
/// bytes are the wire bytes on any host.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct WireVertex {
    words: [u32; DeviceVertex::ATTRIBUTE_COUNT],
}

impl WireVertex {
    /// Size of one record in bytes
    pub const SIZE: usize = std::mem::size_of::<WireVertex>();

    /// Convert every attribute of a device vertex to fixed point
    pub fn from_vertex(vertex: &DeviceVertex) -> Self {
        let attributes = vertex.attributes();
        Self {
            words: std::array::from_fn(|i| fixed::encode(attributes[i]).to_le()),
        }
    }

    /// Read a record from exactly [`Self::SIZE`] little-endian bytes
    pub fn from_le_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        // The buffer may not be 4-byte aligned
        bytemuck::pod_read_unaligned(bytes)
    }

    /// The record's wire bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Fixed-point words in host order
    pub fn words(&self) -> [u32; DeviceVertex::ATTRIBUTE_COUNT] {
        self.words.map(u32::from_le)
    }

    /// Decode back to real values, within one fixed-point step of the input
    pub fn to_vertex(&self) -> DeviceVertex {
        DeviceVertex::from_attributes(self.words().map(fixed::decode))
    }
}
