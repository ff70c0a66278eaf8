// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

use std::borrow::Cow;

use midir::{MidiInput, MidiOutput};

use super::{DeviceEnumerator, EnumerateResult, EnumeratedDevice};
use crate::{BackendHandle, Direction};

const DEFAULT_CLIENT_NAME: &str = "midi-defaults port enumerator";

#[cfg(all(target_os = "linux", feature = "jack"))]
const INTERFACE: &str = "JACK";
#[cfg(all(target_os = "linux", not(feature = "jack")))]
const INTERFACE: &str = "ALSA";
#[cfg(target_os = "macos")]
const INTERFACE: &str = "CoreMIDI";
#[cfg(target_os = "windows")]
const INTERFACE: &str = "MMSystem";
#[cfg(target_family = "wasm")]
const INTERFACE: &str = "WebMIDI";
#[cfg(not(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "windows",
    target_family = "wasm"
)))]
const INTERFACE: &str = "midir";

/// Enumerates the MIDI ports of the platform's native API via [`midir`].
///
/// Input ports are reported before output ports. The backend handle
/// is the index of the port within its direction.
#[derive(Debug, Clone)]
pub struct MidirEnumerator {
    client_name: Cow<'static, str>,
}

impl MidirEnumerator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            client_name: Cow::Borrowed(DEFAULT_CLIENT_NAME),
        }
    }

    #[must_use]
    pub fn with_client_name(client_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }

    fn enumerate_inputs(&self) -> EnumerateResult<Vec<EnumeratedDevice>> {
        let input = MidiInput::new(&self.client_name)?;
        let devices = input
            .ports()
            .iter()
            .zip(0u64..)
            .filter_map(|(port, index)| {
                let name = match input.port_name(port) {
                    Ok(name) => name,
                    Err(err) => {
                        log::warn!("Skipping MIDI input port #{index}: {err}");
                        return None;
                    }
                };
                Some(new_device(name, Direction::Input, index))
            })
            .collect();
        Ok(devices)
    }

    fn enumerate_outputs(&self) -> EnumerateResult<Vec<EnumeratedDevice>> {
        let output = MidiOutput::new(&self.client_name)?;
        let devices = output
            .ports()
            .iter()
            .zip(0u64..)
            .filter_map(|(port, index)| {
                let name = match output.port_name(port) {
                    Ok(name) => name,
                    Err(err) => {
                        log::warn!("Skipping MIDI output port #{index}: {err}");
                        return None;
                    }
                };
                Some(new_device(name, Direction::Output, index))
            })
            .collect();
        Ok(devices)
    }
}

impl Default for MidirEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

fn new_device(name: String, direction: Direction, index: u64) -> EnumeratedDevice {
    log::debug!("Found MIDI {direction} port \"{name}\"");
    EnumeratedDevice {
        name: name.into(),
        interface: INTERFACE.into(),
        direction,
        handle: BackendHandle::new(index),
    }
}

impl DeviceEnumerator for MidirEnumerator {
    fn name(&self) -> &str {
        "midir"
    }

    fn enumerate(&mut self) -> EnumerateResult<Vec<EnumeratedDevice>> {
        let mut devices = self.enumerate_inputs()?;
        devices.extend(self.enumerate_outputs()?);
        Ok(devices)
    }
}
