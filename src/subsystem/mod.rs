// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

use crate::{
    BackendRegistrar, DefaultDeviceResolver, DeviceDescriptor, DeviceId, DeviceRegistry,
    Direction, OutOfRange, PreferenceKeys, PreferenceStore,
};

pub type BoxedPreferenceStore = Box<dyn PreferenceStore + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum LifecycleState {
    Uninitialized,
    Initialized,
    Terminated,
}

#[derive(Debug, Clone, Default)]
pub struct SubsystemConfig {
    pub preference_keys: PreferenceKeys,

    /// Wait for the user to press Enter before terminating.
    ///
    /// Allows to read diagnostic console output before a console
    /// application exits. Only honored in debug builds.
    pub pause_before_exit: bool,
}

/// Owner of the device registry and its backends
///
/// The registry is populated by [`MidiSubsystem::initialize()`] and
/// released by [`MidiSubsystem::terminate()`], which is also invoked
/// when the subsystem is dropped.
///
/// After initialization all queries only need shared access and could
/// be invoked concurrently.
#[allow(missing_debug_implementations)]
pub struct MidiSubsystem {
    config: SubsystemConfig,
    state: LifecycleState,
    registry: DeviceRegistry,
    registrar: BackendRegistrar,
    store: BoxedPreferenceStore,
}

impl MidiSubsystem {
    #[must_use]
    pub fn new(
        config: SubsystemConfig,
        registrar: BackendRegistrar,
        store: BoxedPreferenceStore,
    ) -> Self {
        Self {
            config,
            state: LifecycleState::Uninitialized,
            registry: DeviceRegistry::new(),
            registrar,
            store,
        }
    }

    #[must_use]
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &SubsystemConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Enumerate all devices.
    ///
    /// Only the first invocation has an effect.
    pub fn initialize(&mut self) {
        match self.state {
            LifecycleState::Uninitialized => (),
            LifecycleState::Initialized => {
                log::debug!("MIDI subsystem already initialized");
                return;
            }
            LifecycleState::Terminated => {
                log::warn!("Cannot initialize terminated MIDI subsystem");
                return;
            }
        }
        log::info!("Initializing MIDI subsystem");
        self.registry.ensure_initialized(&mut self.registrar);
        self.state = LifecycleState::Initialized;
        log::info!(
            "MIDI subsystem initialized with {count} device(s)",
            count = self.registry.count()
        );
    }

    /// Release all backend resources.
    ///
    /// Does nothing if the subsystem has never been initialized or
    /// has already been terminated.
    pub fn terminate(&mut self) {
        match self.state {
            LifecycleState::Initialized => (),
            LifecycleState::Uninitialized | LifecycleState::Terminated => {
                log::debug!(
                    "Nothing to terminate in state {state}",
                    state = self.state
                );
                return;
            }
        }
        log::info!("Terminating MIDI subsystem");
        self.registrar.terminate();
        self.registry.clear();
        self.state = LifecycleState::Terminated;
        if self.config.pause_before_exit {
            pause_before_exit();
        }
    }

    #[must_use]
    pub fn device_count(&self) -> usize {
        self.registry.count()
    }

    pub fn device_descriptor(&self, id: DeviceId) -> Result<&DeviceDescriptor, OutOfRange> {
        self.registry.descriptor_at(id)
    }

    #[must_use]
    pub fn resolver(&self) -> DefaultDeviceResolver<'_, dyn PreferenceStore + Send + Sync> {
        DefaultDeviceResolver::new(
            &self.registry,
            &*self.store,
            &self.config.preference_keys,
        )
    }

    #[must_use]
    pub fn default_device_id(&self, direction: Direction) -> DeviceId {
        self.resolver().default_device_id(direction)
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

impl Drop for MidiSubsystem {
    fn drop(&mut self) {
        self.terminate();
    }
}

#[cfg(debug_assertions)]
fn pause_before_exit() {
    use std::io::{stdin, stdout, Write as _};

    print!("Type Enter to exit...");
    let _: std::io::Result<()> = stdout().flush();
    let mut line = String::new();
    if let Err(err) = stdin().read_line(&mut line) {
        log::warn!("Failed to read from stdin: {err}");
    }
}

#[cfg(not(debug_assertions))]
const fn pause_before_exit() {}
