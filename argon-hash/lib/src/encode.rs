//! Digest encodings.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::types::Encoding;

/// A digest rendered for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Raw(Vec<u8>),
    Hex(String),
    Base64(String),
}

impl Encoded {
    pub fn encoding(&self) -> Encoding {
        match self {
            Self::Raw(_) => Encoding::Raw,
            Self::Hex(_) => Encoding::Hex,
            Self::Base64(_) => Encoding::Base64,
        }
    }

    /// The textual form, or `None` for raw output.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Raw(_) => None,
            Self::Hex(text) | Self::Base64(text) => Some(text.as_str()),
        }
    }

    /// The bytes a caller would write out: the digest itself for raw
    /// output, the ASCII text otherwise.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Raw(bytes) => bytes,
            Self::Hex(text) | Self::Base64(text) => text.into_bytes(),
        }
    }
}

/// Renders `digest` in the requested encoding.
pub fn encode(digest: Vec<u8>, encoding: Encoding) -> Encoded {
    match encoding {
        Encoding::Raw => Encoded::Raw(digest),
        Encoding::Hex => Encoded::Hex(to_hex(&digest)),
        Encoding::Base64 => Encoded::Base64(to_base64(&digest)),
    }
}

/// Lowercase hex, two characters per byte, no prefix or separators.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Standard-alphabet, padded base64.
pub fn to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}
