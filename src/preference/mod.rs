// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

//! Stored device preferences
//!
//! The name of the preferred device is stored by an external settings
//! subsystem in a nested key-value store, using an escaped-case encoding
//! in which uppercase characters are prefixed with `/`. This module only
//! reads these preferences.

use std::{borrow::Cow, io};

use thiserror::Error;

use crate::Direction;

mod decode;
pub use self::decode::{decode_pattern, PreferencePattern};

mod memory;
pub use self::memory::MemoryPreferenceStore;

#[cfg(feature = "json-store")]
mod json;
#[cfg(feature = "json-store")]
pub use self::json::{JsonPreferenceStore, JsonStoreError};

/// Maximum number of bytes of a stored preference value.
pub const PATTERN_MAX: usize = 256;

/// Number of nested key levels above a preference value.
pub const KEY_PATH_DEPTH: usize = 4;

/// Location of a single preference value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencePath<'a> {
    /// Nested keys, outermost first
    pub keys: &'a [Cow<'static, str>; KEY_PATH_DEPTH],

    /// Name of the value within the innermost key
    pub value_name: &'a str,
}

/// Configures where the preferred devices are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceKeys {
    pub key_path: [Cow<'static, str>; KEY_PATH_DEPTH],
    pub input_value_name: Cow<'static, str>,
    pub output_value_name: Cow<'static, str>,
}

impl PreferenceKeys {
    #[must_use]
    pub fn path(&self, direction: Direction) -> PreferencePath<'_> {
        let value_name = match direction {
            Direction::Input => &self.input_value_name,
            Direction::Output => &self.output_value_name,
        };
        PreferencePath {
            keys: &self.key_path,
            value_name,
        }
    }
}

impl Default for PreferenceKeys {
    fn default() -> Self {
        Self {
            key_path: [
                Cow::Borrowed("Software"),
                Cow::Borrowed("JavaSoft"),
                Cow::Borrowed("Prefs"),
                Cow::Borrowed("/Port/Midi"),
            ],
            input_value_name: Cow::Borrowed("/P/M_/R/E/C/O/M/M/E/N/D/E/D_/I/N/P/U/T_/D/E/V/I/C/E"),
            output_value_name: Cow::Borrowed(
                "/P/M_/R/E/C/O/M/M/E/N/D/E/D_/O/U/T/P/U/T_/D/E/V/I/C/E",
            ),
        }
    }
}

/// Reasons why a preference value could not be read.
///
/// Only used for diagnostics. Callers treat every failure
/// as "no preference".
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("key \"{key}\" not found at level {depth}")]
    KeyNotFound { depth: usize, key: String },

    #[error("access to key \"{key}\" at level {depth} denied")]
    AccessDenied { depth: usize, key: String },

    #[error("value \"{value_name}\" not found")]
    ValueNotFound { value_name: String },

    #[error("value \"{value_name}\" is malformed")]
    Malformed { value_name: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type LookupResult<T> = std::result::Result<T, LookupError>;

/// Read-only access to a nested key-value store.
pub trait PreferenceStore {
    /// Read the raw bytes of a preference value.
    ///
    /// Implementations must not return more than [`PATTERN_MAX`] bytes.
    fn lookup(&self, path: &PreferencePath<'_>) -> LookupResult<Vec<u8>>;
}

impl<S> PreferenceStore for &S
where
    S: PreferenceStore + ?Sized,
{
    fn lookup(&self, path: &PreferencePath<'_>) -> LookupResult<Vec<u8>> {
        (**self).lookup(path)
    }
}

impl<S> PreferenceStore for Box<S>
where
    S: PreferenceStore + ?Sized,
{
    fn lookup(&self, path: &PreferencePath<'_>) -> LookupResult<Vec<u8>> {
        (**self).lookup(path)
    }
}

/// Store without any entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyPreferenceStore;

impl PreferenceStore for EmptyPreferenceStore {
    fn lookup(&self, path: &PreferencePath<'_>) -> LookupResult<Vec<u8>> {
        let PreferencePath { keys, .. } = path;
        Err(LookupError::KeyNotFound {
            depth: 0,
            key: keys[0].to_string(),
        })
    }
}

pub(crate) fn truncate_value(mut bytes: Vec<u8>) -> Vec<u8> {
    if bytes.len() > PATTERN_MAX {
        log::debug!(
            "Truncating preference value from {len} to {PATTERN_MAX} bytes",
            len = bytes.len()
        );
        bytes.truncate(PATTERN_MAX);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys_decode_to_plain_value_names() {
        let keys = PreferenceKeys::default();
        assert_eq!(
            "PM_RECOMMENDED_INPUT_DEVICE",
            decode_pattern(keys.input_value_name.as_bytes()).as_str()
        );
        assert_eq!(
            "PM_RECOMMENDED_OUTPUT_DEVICE",
            decode_pattern(keys.output_value_name.as_bytes()).as_str()
        );
    }

    #[test]
    fn path_selects_value_name_by_direction() {
        let keys = PreferenceKeys::default();
        assert_eq!(
            keys.input_value_name,
            keys.path(Direction::Input).value_name
        );
        assert_eq!(
            keys.output_value_name,
            keys.path(Direction::Output).value_name
        );
        assert_eq!(&keys.key_path, keys.path(Direction::Output).keys);
    }

    #[test]
    fn truncate_long_values() {
        assert_eq!(PATTERN_MAX, truncate_value(vec![b'x'; PATTERN_MAX + 1]).len());
        assert_eq!(3, truncate_value(b"abc".to_vec()).len());
    }
}
