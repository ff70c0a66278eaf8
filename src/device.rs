// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

use std::borrow::Cow;

use strum::Display;

/// Identifier of a registered device
///
/// 0-based, consecutive index that enumerates registered devices in
/// the order of their registration. The value is stable for the
/// lifetime of the registry but must not be stored persistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[repr(transparent)]
pub struct DeviceId(usize);

impl DeviceId {
    /// Sentinel for "no device"
    ///
    /// Never a valid index into a registry.
    pub const NO_DEVICE: Self = Self(usize::MAX);

    #[must_use]
    pub(crate) const fn from_index(index: usize) -> Self {
        debug_assert!(index != usize::MAX);
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        let Self(index) = self;
        index
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.index() != Self::NO_DEVICE.index()
    }

    /// Convert into an [`Option`], mapping [`Self::NO_DEVICE`] to `None`.
    #[must_use]
    pub const fn into_option(self) -> Option<Self> {
        if self.is_valid() {
            Some(self)
        } else {
            None
        }
    }
}

impl From<Option<DeviceId>> for DeviceId {
    fn from(from: Option<DeviceId>) -> Self {
        from.unwrap_or(Self::NO_DEVICE)
    }
}

/// Direction of a MIDI device
///
/// The variant names reflect the view of the application, i.e.
/// an input device delivers MIDI messages and an output device
/// receives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
}

/// Opaque reference into the backend that enumerated a device
///
/// Only meaningful for the backend that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{_0:#x}")]
#[repr(transparent)]
pub struct BackendHandle(u64);

impl BackendHandle {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        let Self(value) = self;
        value
    }
}

/// Immutable record of a registered device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub id: DeviceId,
    pub direction: Direction,

    /// Device or port name as reported by the backend
    pub name: Cow<'static, str>,

    /// Host API or backend through which the device is reachable,
    /// e.g. "ALSA", "CoreMIDI" or "MMSystem"
    pub interface: Cow<'static, str>,

    pub backend_handle: BackendHandle,
}

impl DeviceDescriptor {
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(self.direction, Direction::Input)
    }

    #[must_use]
    pub const fn is_output(&self) -> bool {
        matches!(self.direction, Direction::Output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_device_is_never_valid() {
        assert!(!DeviceId::NO_DEVICE.is_valid());
        assert_eq!(None, DeviceId::NO_DEVICE.into_option());
        assert_eq!(DeviceId::NO_DEVICE, DeviceId::from(None));
    }

    #[test]
    fn valid_device_id() {
        let id = DeviceId::from_index(3);
        assert!(id.is_valid());
        assert_eq!(3, id.index());
        assert_eq!(Some(id), id.into_option());
        assert_eq!("3", id.to_string());
    }

    #[test]
    fn direction_display() {
        assert_eq!("input", Direction::Input.to_string());
        assert_eq!("output", Direction::Output.to_string());
    }
}
