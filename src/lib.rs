// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

#![allow(rustdoc::invalid_rust_codeblocks)]
#![doc = include_str!("../README.md")]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(rustdoc::broken_intra_doc_links)]
// Repetitions of module/type names occur frequently when using many
// modules for keeping the size of the source files handy. Often
// types have the same name as their parent module.
#![allow(clippy::module_name_repetitions)]
// Repeating the type name in `..Default::default()` expressions
// is not needed since the context is obvious.
#![allow(clippy::default_trait_access)]

pub mod alloc;

mod backend;
#[cfg(feature = "midir")]
pub use self::backend::MidirEnumerator;
pub use self::backend::{
    BackendRegistrar, BoxedDeviceEnumerator, DeviceEnumerator, EnumerateError, EnumerateResult,
    EnumeratedDevice, FixedEnumerator,
};

mod device;
pub use self::device::{BackendHandle, DeviceDescriptor, DeviceId, Direction};

mod preference;
#[cfg(feature = "json-store")]
pub use self::preference::{JsonPreferenceStore, JsonStoreError};
pub use self::preference::{
    decode_pattern, EmptyPreferenceStore, LookupError, LookupResult, MemoryPreferenceStore,
    PreferenceKeys, PreferencePath, PreferencePattern, PreferenceStore, KEY_PATH_DEPTH,
    PATTERN_MAX,
};

mod registry;
pub use self::registry::{DeviceRegistry, OutOfRange};

mod resolver;
pub use self::resolver::DefaultDeviceResolver;

mod subsystem;
pub use self::subsystem::{BoxedPreferenceStore, LifecycleState, MidiSubsystem, SubsystemConfig};
