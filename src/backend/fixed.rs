// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

use std::borrow::Cow;

use super::{DeviceEnumerator, EnumerateResult, EnumeratedDevice};
use crate::{BackendHandle, Direction};

/// Backend that reports a predefined list of devices.
///
/// Useful for virtual ports and for running without any hardware.
#[derive(Debug, Clone)]
pub struct FixedEnumerator {
    name: Cow<'static, str>,
    interface: Cow<'static, str>,
    devices: Vec<(Cow<'static, str>, Direction)>,
}

impl FixedEnumerator {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, interface: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            interface: interface.into(),
            devices: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_device(
        mut self,
        name: impl Into<Cow<'static, str>>,
        direction: Direction,
    ) -> Self {
        self.devices.push((name.into(), direction));
        self
    }
}

impl DeviceEnumerator for FixedEnumerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn enumerate(&mut self) -> EnumerateResult<Vec<EnumeratedDevice>> {
        let devices = self
            .devices
            .iter()
            .zip(0u64..)
            .map(|((name, direction), index)| EnumeratedDevice {
                name: name.clone(),
                interface: self.interface.clone(),
                direction: *direction,
                handle: BackendHandle::new(index),
            })
            .collect();
        Ok(devices)
    }
}
