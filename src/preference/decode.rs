// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

use super::PATTERN_MAX;

const ESCAPE_UPPERCASE: u8 = b'/';

/// Decoded device name preference
///
/// Only used as a key for matching device names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, derive_more::Display)]
pub struct PreferencePattern(String);

impl PreferencePattern {
    #[must_use]
    pub fn as_str(&self) -> &str {
        let Self(inner) = self;
        inner
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl AsRef<str> for PreferencePattern {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for PreferencePattern {
    fn from(from: &str) -> Self {
        Self(from.to_owned())
    }
}

/// Decode a stored, escaped-case preference value.
///
/// Each `/` followed by another byte is dropped and that byte is converted
/// to uppercase. All other bytes are converted to lowercase. Decoding stops
/// at the first NUL byte or after [`PATTERN_MAX`] bytes, whatever comes first.
/// A trailing `/` without a successor is kept as is.
///
/// Case conversion only applies to ASCII characters. Invalid UTF-8 sequences
/// in the decoded bytes are replaced with U+FFFD.
#[must_use]
pub fn decode_pattern(raw: &[u8]) -> PreferencePattern {
    let bounded = &raw[..raw.len().min(PATTERN_MAX)];
    let terminated = bounded
        .iter()
        .position(|&byte| byte == 0)
        .map_or(bounded, |nul_pos| &bounded[..nul_pos]);
    let mut decoded = Vec::with_capacity(terminated.len());
    let mut rest = terminated;
    loop {
        rest = match rest {
            [ESCAPE_UPPERCASE, next, tail @ ..] => {
                decoded.push(next.to_ascii_uppercase());
                tail
            }
            [byte, tail @ ..] => {
                decoded.push(byte.to_ascii_lowercase());
                tail
            }
            [] => break,
        };
    }
    let decoded = String::from_utf8(decoded)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned());
    PreferencePattern(decoded)
}
