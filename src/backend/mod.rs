// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

//! Device enumeration backends
//!
//! Each backend contributes the devices it knows about to a single
//! [`DeviceRegistry`]. Backends are invoked in the order in which they
//! have been added to the [`BackendRegistrar`].

use std::borrow::Cow;

use thiserror::Error;

use crate::{BackendHandle, DeviceRegistry, Direction};

mod fixed;
pub use self::fixed::FixedEnumerator;

#[cfg(feature = "midir")]
mod midir;
#[cfg(feature = "midir")]
pub use self::midir::MidirEnumerator;

#[derive(Debug, Error)]
pub enum EnumerateError {
    #[cfg(feature = "midir")]
    #[error(transparent)]
    Init(#[from] ::midir::InitError),

    #[error("{msg}")]
    Other { msg: Cow<'static, str> },
}

pub type EnumerateResult<T> = std::result::Result<T, EnumerateError>;

/// A device as reported by a backend, before registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumeratedDevice {
    pub name: Cow<'static, str>,
    pub interface: Cow<'static, str>,
    pub direction: Direction,
    pub handle: BackendHandle,
}

/// Enumeration hook of a device backend
pub trait DeviceEnumerator: Send + Sync {
    /// Name of the backend, only used for diagnostics.
    #[must_use]
    fn name(&self) -> &str;

    /// List the devices that are currently available.
    ///
    /// The order of the returned devices determines the order
    /// of their ids.
    fn enumerate(&mut self) -> EnumerateResult<Vec<EnumeratedDevice>>;

    /// Release all backend resources.
    ///
    /// Invoked at most once. The default implementation does nothing.
    fn terminate(&mut self) {}
}

pub type BoxedDeviceEnumerator = Box<dyn DeviceEnumerator + 'static>;

/// Populates a [`DeviceRegistry`] from a fixed sequence of backends.
#[allow(missing_debug_implementations)]
#[derive(Default)]
pub struct BackendRegistrar {
    enumerators: Vec<BoxedDeviceEnumerator>,
}

impl BackendRegistrar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrar with all backends that are enabled by crate features.
    #[must_use]
    pub fn with_default_backends() -> Self {
        #[allow(unused_mut)]
        let mut registrar = Self::new();
        #[cfg(feature = "midir")]
        registrar.add_enumerator(Box::new(MidirEnumerator::new()));
        registrar
    }

    #[must_use]
    pub fn with_enumerator(mut self, enumerator: BoxedDeviceEnumerator) -> Self {
        self.add_enumerator(enumerator);
        self
    }

    pub fn add_enumerator(&mut self, enumerator: BoxedDeviceEnumerator) {
        log::debug!(
            "Adding device enumerator \"{name}\"",
            name = enumerator.name()
        );
        self.enumerators.push(enumerator);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.enumerators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enumerators.is_empty()
    }

    /// Run all backends and append their devices to the registry.
    ///
    /// A failing backend is skipped and does not affect the others.
    ///
    /// Returns the number of registered devices.
    pub(crate) fn populate(&mut self, registry: &mut DeviceRegistry) -> usize {
        let mut registered = 0;
        for enumerator in &mut self.enumerators {
            let devices = match enumerator.enumerate() {
                Ok(devices) => devices,
                Err(err) => {
                    log::warn!(
                        "Failed to enumerate devices of backend \"{name}\": {err}",
                        name = enumerator.name()
                    );
                    continue;
                }
            };
            log::debug!(
                "Backend \"{name}\" enumerated {count} device(s)",
                name = enumerator.name(),
                count = devices.len()
            );
            for device in devices {
                registry.register(device);
                registered += 1;
            }
        }
        registered
    }

    /// Invoke the termination hook of all backends in reverse order.
    pub fn terminate(&mut self) {
        for enumerator in self.enumerators.iter_mut().rev() {
            log::debug!(
                "Terminating backend \"{name}\"",
                name = enumerator.name()
            );
            enumerator.terminate();
        }
    }
}

#[cfg(test)]
mod tests;
