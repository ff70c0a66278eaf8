// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

use crate::{
    decode_pattern, DeviceId, DeviceRegistry, Direction, PreferenceKeys, PreferenceStore,
};

/// Resolves the default device for each direction.
///
/// The first registered device of a direction is the fallback. A stored
/// preference overrides the fallback if it matches a registered device.
/// Failures while reading the preference are not errors and silently
/// result in the fallback.
#[derive(Debug)]
pub struct DefaultDeviceResolver<'a, S: ?Sized> {
    registry: &'a DeviceRegistry,
    store: &'a S,
    keys: &'a PreferenceKeys,
}

impl<'a, S> DefaultDeviceResolver<'a, S>
where
    S: PreferenceStore + ?Sized,
{
    #[must_use]
    pub const fn new(registry: &'a DeviceRegistry, store: &'a S, keys: &'a PreferenceKeys) -> Self {
        Self {
            registry,
            store,
            keys,
        }
    }

    #[must_use]
    pub fn default_device_id(&self, direction: Direction) -> DeviceId {
        let fallback = self.registry.first_matching(direction);
        let path = self.keys.path(direction);
        let raw = match self.store.lookup(&path) {
            Ok(raw) => raw,
            Err(err) => {
                log::debug!("No preferred {direction} device: {err}");
                return fallback;
            }
        };
        let pattern = decode_pattern(&raw);
        let matched = self.registry.find_by_pattern(direction, &pattern);
        if matched.is_valid() {
            log::debug!("Preferred {direction} device \"{pattern}\" matches device {matched}");
            matched
        } else {
            log::debug!(
                "Preferred {direction} device \"{pattern}\" not found, using fallback {fallback:?}"
            );
            fallback
        }
    }

    #[must_use]
    pub fn default_input_id(&self) -> DeviceId {
        self.default_device_id(Direction::Input)
    }

    #[must_use]
    pub fn default_output_id(&self) -> DeviceId {
        self.default_device_id(Direction::Output)
    }
}
