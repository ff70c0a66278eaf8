// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

use std::collections::HashMap;

use super::{truncate_value, LookupError, LookupResult, PreferencePath, PreferenceStore};

#[derive(Debug, Clone, Default)]
struct MemoryKey {
    access_denied: bool,
    subkeys: HashMap<String, MemoryKey>,
    values: HashMap<String, Vec<u8>>,
}

impl MemoryKey {
    fn subkey_mut<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) -> &mut MemoryKey {
        keys.into_iter().fold(self, |key, name| {
            key.subkeys.entry(name.to_owned()).or_default()
        })
    }
}

/// Nested key-value store in memory
///
/// Intended for embedding preferences that have been obtained elsewhere
/// and for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    root: MemoryKey,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value, creating all intermediate keys.
    pub fn insert_value<'a>(
        &mut self,
        keys: impl IntoIterator<Item = &'a str>,
        value_name: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) {
        self.root
            .subkey_mut(keys)
            .values
            .insert(value_name.into(), value.into());
    }

    /// Deny access to a key and everything below it.
    pub fn deny_access<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        self.root.subkey_mut(keys).access_denied = true;
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn lookup(&self, path: &PreferencePath<'_>) -> LookupResult<Vec<u8>> {
        let PreferencePath { keys, value_name } = path;
        let mut key = &self.root;
        for (depth, name) in keys.iter().enumerate() {
            key = key
                .subkeys
                .get::<str>(name)
                .ok_or_else(|| LookupError::KeyNotFound {
                    depth,
                    key: name.to_string(),
                })?;
            if key.access_denied {
                return Err(LookupError::AccessDenied {
                    depth,
                    key: name.to_string(),
                });
            }
        }
        key.values
            .get(*value_name)
            .cloned()
            .map(truncate_value)
            .ok_or_else(|| LookupError::ValueNotFound {
                value_name: (*value_name).to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::preference::{KEY_PATH_DEPTH, PATTERN_MAX};

    static KEY_PATH: [Cow<'static, str>; KEY_PATH_DEPTH] = [
        Cow::Borrowed("Software"),
        Cow::Borrowed("Vendor"),
        Cow::Borrowed("Prefs"),
        Cow::Borrowed("Midi"),
    ];

    fn path(value_name: &str) -> PreferencePath<'_> {
        PreferencePath {
            keys: &KEY_PATH,
            value_name,
        }
    }

    #[test]
    fn lookup_existing_value() {
        let mut store = MemoryPreferenceStore::new();
        store.insert_value(["Software", "Vendor", "Prefs", "Midi"], "in", "/Keys");
        assert_eq!(b"/Keys".to_vec(), store.lookup(&path("in")).unwrap());
    }

    #[test]
    fn lookup_missing_key() {
        let mut store = MemoryPreferenceStore::new();
        store.insert_value(["Software", "Vendor"], "in", "/Keys");
        assert!(matches!(
            store.lookup(&path("in")),
            Err(LookupError::KeyNotFound { depth: 2, .. })
        ));
    }

    #[test]
    fn lookup_missing_value() {
        let mut store = MemoryPreferenceStore::new();
        store.insert_value(["Software", "Vendor", "Prefs", "Midi"], "out", "/Synth");
        assert!(matches!(
            store.lookup(&path("in")),
            Err(LookupError::ValueNotFound { .. })
        ));
    }

    #[test]
    fn lookup_denied_key() {
        let mut store = MemoryPreferenceStore::new();
        store.insert_value(["Software", "Vendor", "Prefs", "Midi"], "in", "/Keys");
        store.deny_access(["Software", "Vendor"]);
        assert!(matches!(
            store.lookup(&path("in")),
            Err(LookupError::AccessDenied { depth: 1, .. })
        ));
    }

    #[test]
    fn lookup_truncates_long_values() {
        let mut store = MemoryPreferenceStore::new();
        store.insert_value(
            ["Software", "Vendor", "Prefs", "Midi"],
            "in",
            vec![b'k'; PATTERN_MAX + 10],
        );
        assert_eq!(PATTERN_MAX, store.lookup(&path("in")).unwrap().len());
    }
}
