// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

use thiserror::Error;

use crate::{
    BackendRegistrar, DeviceDescriptor, DeviceId, Direction, EnumeratedDevice, PreferencePattern,
};

const INITIAL_CAPACITY: usize = 64;

/// Separator between the interface and the name part of a pattern.
const INTERFACE_SEPARATOR: &str = ", ";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("device id {id} out of range (count = {count})")]
pub struct OutOfRange {
    pub id: DeviceId,
    pub count: usize,
}

/// Table of enumerated devices
///
/// Append-only while being populated, read-only afterwards. Ids
/// equal the position of insertion.
#[derive(Debug)]
pub struct DeviceRegistry {
    descriptors: Vec<DeviceDescriptor>,
    initialized: bool,
}

impl DeviceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptors: Vec::with_capacity(INITIAL_CAPACITY),
            initialized: false,
        }
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Populate the registry once.
    ///
    /// The first invocation runs all backends of the registrar. Subsequent
    /// invocations are no-ops, even if the backends did not contribute any
    /// devices.
    ///
    /// Returns `true` if the registry has been populated by this invocation.
    pub fn ensure_initialized(&mut self, registrar: &mut BackendRegistrar) -> bool {
        if self.initialized {
            log::debug!(
                "Device registry already initialized with {count} device(s)",
                count = self.count()
            );
            return false;
        }
        let count = registrar.populate(self);
        log::debug!("Device registry initialized with {count} device(s)");
        self.initialized = true;
        true
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn descriptor_at(&self, id: DeviceId) -> Result<&DeviceDescriptor, OutOfRange> {
        self.descriptors.get(id.index()).ok_or(OutOfRange {
            id,
            count: self.count(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceDescriptor> {
        self.descriptors.iter()
    }

    /// The first registered device of the given direction.
    #[must_use]
    pub fn first_matching(&self, direction: Direction) -> DeviceId {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.direction == direction)
            .map(|descriptor| descriptor.id)
            .into()
    }

    /// The first registered device of the given direction that matches the pattern.
    ///
    /// The pattern is either `"<name>"` or `"<interface>, <name>"`. Both parts
    /// are matched as case-sensitive substrings of the corresponding descriptor
    /// fields.
    #[must_use]
    pub fn find_by_pattern(&self, direction: Direction, pattern: &PreferencePattern) -> DeviceId {
        let (interface_pattern, name_pattern) = split_pattern(pattern.as_str());
        self.descriptors
            .iter()
            .find(|descriptor| {
                descriptor.direction == direction
                    && descriptor.name.contains(name_pattern)
                    && descriptor.interface.contains(interface_pattern)
            })
            .map(|descriptor| descriptor.id)
            .into()
    }

    /// Append an enumerated device and assign the next id.
    pub(crate) fn register(&mut self, device: EnumeratedDevice) -> DeviceId {
        debug_assert!(!self.initialized);
        let id = DeviceId::from_index(self.descriptors.len());
        let EnumeratedDevice {
            name,
            interface,
            direction,
            handle,
        } = device;
        let descriptor = DeviceDescriptor {
            id,
            direction,
            name,
            interface,
            backend_handle: handle,
        };
        log::debug!("Registering device {id}: {descriptor:?}");
        self.descriptors.push(descriptor);
        id
    }

    /// Discard all devices and return to the uninitialized state.
    pub(crate) fn clear(&mut self) {
        self.descriptors.clear();
        self.initialized = false;
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn split_pattern(pattern: &str) -> (&str, &str) {
    pattern
        .split_once(INTERFACE_SEPARATOR)
        .unwrap_or(("", pattern))
}
