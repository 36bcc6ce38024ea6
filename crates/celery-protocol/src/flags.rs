use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Render state flags carried by a SET_CONFIG command.
///
/// Bits 4-7 are reserved and must be zero on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ConfigFlags(u8);

impl ConfigFlags {
    pub const NONE: ConfigFlags = ConfigFlags(0);
    pub const TEXTURE_ENABLE: ConfigFlags = ConfigFlags(0x01);
    pub const DEPTH_TEST: ConfigFlags = ConfigFlags(0x02);
    pub const DEPTH_WRITE: ConfigFlags = ConfigFlags(0x04);
    pub const BLEND_ENABLE: ConfigFlags = ConfigFlags(0x08);

    const DEFINED: u8 = 0x0F;

    /// Flags used by the cube animation: depth tested and written, no texture
    /// or blending.
    pub const fn depth_only() -> Self {
        ConfigFlags(Self::DEPTH_TEST.0 | Self::DEPTH_WRITE.0)
    }

    /// Build from a raw byte, rejecting reserved bits.
    pub fn from_bits(bits: u8) -> Result<Self, ProtocolError> {
        if bits & !Self::DEFINED != 0 {
            return Err(ProtocolError::ReservedFlags(bits));
        }
        Ok(ConfigFlags(bits))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: ConfigFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn set(&mut self, other: ConfigFlags, enabled: bool) {
        if enabled {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

impl BitOr for ConfigFlags {
    type Output = ConfigFlags;

    fn bitor(self, rhs: ConfigFlags) -> ConfigFlags {
        ConfigFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ConfigFlags {
    fn bitor_assign(&mut self, rhs: ConfigFlags) {
        self.0 |= rhs.0;
    }
}

impl TryFrom<u8> for ConfigFlags {
    type Error = ProtocolError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
    }
}

impl From<ConfigFlags> for u8 {
    fn from(flags: ConfigFlags) -> u8 {
        flags.0
    }
}

impl fmt::Debug for ConfigFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(ConfigFlags, &str); 4] = [
            (ConfigFlags::TEXTURE_ENABLE, "TEXTURE_ENABLE"),
            (ConfigFlags::DEPTH_TEST, "DEPTH_TEST"),
            (ConfigFlags::DEPTH_WRITE, "DEPTH_WRITE"),
            (ConfigFlags::BLEND_ENABLE, "BLEND_ENABLE"),
        ];
        let set: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        if set.is_empty() {
            write!(f, "ConfigFlags(NONE)")
        } else {
            write!(f, "ConfigFlags({})", set.join(" | "))
        }
    }
}
