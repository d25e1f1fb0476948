//! Conversion between stored member bytes and editable text.

use zs_config::TextPolicy;

use crate::{ArchiveError, Result};

/// UTF-8 text codec with a configurable decoding policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCodec {
    policy: TextPolicy,
}

impl TextCodec {
    pub fn new(policy: TextPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TextPolicy {
        self.policy
    }

    /// Decode the bytes of `path` according to the policy.
    pub fn decode(&self, path: &str, bytes: &[u8]) -> Result<String> {
        match self.policy {
            TextPolicy::Lossy => Ok(decode_lossy(bytes)),
            TextPolicy::Strict => decode_strict(bytes).map_err(|source| ArchiveError::Encoding {
                path: path.to_string(),
                source,
            }),
        }
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        encode(text)
    }
}

/// Best-effort decode; invalid sequences become U+FFFD.
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

pub fn decode_strict(bytes: &[u8]) -> std::result::Result<String, std::str::Utf8Error> {
    std::str::from_utf8(bytes).map(str::to_owned)
}

pub fn encode(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}
