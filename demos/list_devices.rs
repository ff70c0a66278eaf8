// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

//! Lists all MIDI devices and the resolved defaults.
//!
//! Preferences are read from the JSON file given as the first argument.

use std::env;

use midi_defaults::{
    BackendRegistrar, BoxedPreferenceStore, DeviceId, EmptyPreferenceStore, JsonPreferenceStore,
    MidiSubsystem, SubsystemConfig,
};

fn main() {
    pretty_env_logger::init();
    if let Err(err) = run() {
        log::error!("{err}");
    }
}

fn run() -> anyhow::Result<()> {
    let store: BoxedPreferenceStore = match env::args_os().nth(1) {
        Some(path) => Box::new(JsonPreferenceStore::from_file(path)?),
        None => {
            println!("No preferences file given");
            Box::new(EmptyPreferenceStore)
        }
    };
    let config = SubsystemConfig {
        pause_before_exit: true,
        ..Default::default()
    };
    let mut subsystem =
        MidiSubsystem::new(config, BackendRegistrar::with_default_backends(), store);
    subsystem.initialize();

    println!("\nAvailable devices:");
    let default_input_id = subsystem.default_input_id();
    let default_output_id = subsystem.default_output_id();
    for descriptor in subsystem.registry().iter() {
        let marker = if descriptor.id == default_input_id || descriptor.id == default_output_id {
            "*"
        } else {
            " "
        };
        println!(
            "{marker}{id}: {name} ({interface}, {direction})",
            id = descriptor.id,
            name = descriptor.name,
            interface = descriptor.interface,
            direction = descriptor.direction,
        );
    }
    print_default("input", default_input_id);
    print_default("output", default_output_id);

    subsystem.terminate();
    Ok(())
}

fn print_default(direction: &str, id: DeviceId) {
    match id.into_option() {
        Some(id) => println!("Default {direction} device: {id}"),
        None => println!("No {direction} device available"),
    }
}
