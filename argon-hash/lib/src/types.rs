//! Closed enumerations shared by requests, the dispatcher and the encoder.

use std::str::FromStr;

use bitflags::bitflags;

use crate::error::ValidationError;

/// The Argon2 addressing strategy.
///
/// - `D` uses data-dependent addressing (fastest, resists GPU cracking)
/// - `I` uses data-independent addressing (resists side-channel attacks)
/// - `Id` is the hybrid: data-independent for the first half pass, then
///   data-dependent. This is the recommended general-purpose choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Argon2d
    D,
    /// Argon2i
    I,
    /// Argon2id
    #[default]
    Id,
}

impl FromStr for Variant {
    type Err = ValidationError;

    /// Parses the short variant name. Matching is exact: `"ID"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "d" => Ok(Self::D),
            "i" => Ok(Self::I),
            "id" => Ok(Self::Id),
            _ => Err(ValidationError::UnsupportedVariant(s.to_string())),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::D => write!(f, "d"),
            Self::I => write!(f, "i"),
            Self::Id => write!(f, "id"),
        }
    }
}

impl From<Variant> for String {
    fn from(variant: Variant) -> Self {
        variant.to_string()
    }
}

/// Argon2 protocol version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Version {
    /// Legacy version 1.0 (`0x10`).
    V0x10 = 0x10,
    /// Current version 1.3 (`0x13`).
    #[default]
    V0x13 = 0x13,
}

impl Version {
    /// The version number as the primitive expects it.
    pub const fn number(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Version {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0x10 => Ok(Self::V0x10),
            0x13 => Ok(Self::V0x13),
            other => Err(ValidationError::UnsupportedVersion(other)),
        }
    }
}

impl From<Version> for u32 {
    fn from(version: Version) -> Self {
        version.number()
    }
}

/// How a digest is rendered for the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// The digest bytes, unchanged.
    Raw,
    /// Lowercase hexadecimal, two characters per byte.
    #[default]
    Hex,
    /// Standard padded base64.
    Base64,
}

impl FromStr for Encoding {
    type Err = ValidationError;

    /// Parses an encoding name. `b64` is accepted as an alias of `base64`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Self::Raw),
            "hex" => Ok(Self::Hex),
            "base64" | "b64" => Ok(Self::Base64),
            _ => Err(ValidationError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::Hex => write!(f, "hex"),
            Self::Base64 => write!(f, "base64"),
        }
    }
}

impl From<Encoding> for String {
    fn from(encoding: Encoding) -> Self {
        encoding.to_string()
    }
}

bitflags! {
    /// Which sensitive buffers are zeroed once the primitive returns.
    ///
    /// Bit values match the native `ARGON2_FLAG_CLEAR_*` constants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WipeFlags: u32 {
        /// Zero the password buffer after use.
        const CLEAR_PASSWORD = 1 << 0;
        /// Zero the secret (pepper) buffer after use.
        const CLEAR_SECRET = 1 << 1;
    }
}

impl Default for WipeFlags {
    fn default() -> Self {
        Self::CLEAR_PASSWORD | Self::CLEAR_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parses_closed_set() {
        assert_eq!("d".parse::<Variant>().unwrap(), Variant::D);
        assert_eq!("i".parse::<Variant>().unwrap(), Variant::I);
        assert_eq!("id".parse::<Variant>().unwrap(), Variant::Id);
    }

    #[test]
    fn test_variant_rejects_unknown_and_names_it() {
        let err = "x".parse::<Variant>().unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedVariant("x".to_string()));
        assert_eq!(err.to_string(), "unsupported variant 'x'");
    }

    #[test]
    fn test_variant_is_case_sensitive() {
        assert!("ID".parse::<Variant>().is_err());
        assert!(" id".parse::<Variant>().is_err());
    }

    #[test]
    fn test_variant_display_round_trips() {
        for variant in [Variant::D, Variant::I, Variant::Id] {
            assert_eq!(variant.to_string().parse::<Variant>().unwrap(), variant);
        }
    }

    #[test]
    fn test_encoding_accepts_b64_alias() {
        assert_eq!("b64".parse::<Encoding>().unwrap(), Encoding::Base64);
        assert_eq!("base64".parse::<Encoding>().unwrap(), Encoding::Base64);
    }

    #[test]
    fn test_encoding_rejects_yaml() {
        let err = "yaml".parse::<Encoding>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported encoding 'yaml'");
    }

    #[test]
    fn test_version_numbers_match_protocol() {
        assert_eq!(Version::V0x10.number(), 16);
        assert_eq!(Version::V0x13.number(), 19);
        assert_eq!(Version::default(), Version::V0x13);
        assert_eq!(Version::try_from(0x12u32), Err(ValidationError::UnsupportedVersion(0x12)));
    }

    #[test]
    fn test_default_wipe_flags_clear_both() {
        let flags = WipeFlags::default();
        assert!(flags.contains(WipeFlags::CLEAR_PASSWORD));
        assert!(flags.contains(WipeFlags::CLEAR_SECRET));
        assert_eq!(flags.bits(), 0b11);
    }
}
