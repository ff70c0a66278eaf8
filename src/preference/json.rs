// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

use std::{fs, io, path::Path};

use serde_json::Value;
use thiserror::Error;

use super::{truncate_value, LookupError, LookupResult, PreferencePath, PreferenceStore};

#[derive(Debug, Error)]
pub enum JsonStoreError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("root of the preference document is not an object")]
    NotAnObject,
}

/// Read-only preferences from a JSON document
///
/// Each key level is represented by a nested object. Values are
/// strings that contain the raw, escaped-case text:
///
/// ```json
/// {
///   "Software": {
///     "JavaSoft": {
///       "Prefs": {
///         "/Port/Midi": {
///           "/P/M_/R/E/C/O/M/M/E/N/D/E/D_/I/N/P/U/T_/D/E/V/I/C/E": "/Keystation"
///         }
///       }
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    root: Value,
}

impl JsonPreferenceStore {
    pub fn from_json_str(json: &str) -> Result<Self, JsonStoreError> {
        let root = serde_json::from_str(json)?;
        Self::from_value(root)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, JsonStoreError> {
        let path = path.as_ref();
        log::debug!("Loading preferences from {path}", path = path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_value(root: Value) -> Result<Self, JsonStoreError> {
        if !root.is_object() {
            return Err(JsonStoreError::NotAnObject);
        }
        Ok(Self { root })
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn lookup(&self, path: &PreferencePath<'_>) -> LookupResult<Vec<u8>> {
        let PreferencePath { keys, value_name } = path;
        let mut key = &self.root;
        for (depth, name) in keys.iter().enumerate() {
            key = key
                .get::<&str>(name)
                .filter(|subkey| subkey.is_object())
                .ok_or_else(|| LookupError::KeyNotFound {
                    depth,
                    key: name.to_string(),
                })?;
        }
        match key.get(*value_name) {
            Some(Value::String(value)) => Ok(truncate_value(value.as_bytes().to_vec())),
            Some(_) => Err(LookupError::Malformed {
                value_name: (*value_name).to_owned(),
            }),
            None => Err(LookupError::ValueNotFound {
                value_name: (*value_name).to_owned(),
            }),
        }
    }
}
