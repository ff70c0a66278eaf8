// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

use std::sync::{Arc, Mutex};

use super::*;
use crate::DeviceId;

type CallLog = Arc<Mutex<Vec<String>>>;

struct FailingEnumerator;

impl DeviceEnumerator for FailingEnumerator {
    fn name(&self) -> &str {
        "failing"
    }

    fn enumerate(&mut self) -> EnumerateResult<Vec<EnumeratedDevice>> {
        Err(EnumerateError::Other {
            msg: "backend unavailable".into(),
        })
    }
}

struct LoggingEnumerator {
    name: &'static str,
    calls: CallLog,
}

impl DeviceEnumerator for LoggingEnumerator {
    fn name(&self) -> &str {
        self.name
    }

    fn enumerate(&mut self) -> EnumerateResult<Vec<EnumeratedDevice>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("enumerate {}", self.name));
        Ok(Vec::new())
    }

    fn terminate(&mut self) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("terminate {}", self.name));
    }
}

#[test]
fn populate_preserves_backend_order() {
    let mut registrar = BackendRegistrar::new()
        .with_enumerator(Box::new(
            FixedEnumerator::new("first", "ALSA")
                .with_device("In 1", Direction::Input)
                .with_device("Out 1", Direction::Output),
        ))
        .with_enumerator(Box::new(
            FixedEnumerator::new("second", "JACK").with_device("In 2", Direction::Input),
        ));
    let mut registry = DeviceRegistry::new();
    assert_eq!(3, registrar.populate(&mut registry));
    let devices = registry
        .iter()
        .map(|descriptor| (&*descriptor.interface, &*descriptor.name, descriptor.direction))
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            ("ALSA", "In 1", Direction::Input),
            ("ALSA", "Out 1", Direction::Output),
            ("JACK", "In 2", Direction::Input),
        ],
        devices
    );
}

#[test]
fn backend_handles_are_kept() {
    let mut registrar = BackendRegistrar::new().with_enumerator(Box::new(
        FixedEnumerator::new("fixed", "Virtual")
            .with_device("In", Direction::Input)
            .with_device("Out", Direction::Output),
    ));
    let mut registry = DeviceRegistry::new();
    registrar.populate(&mut registry);
    let descriptor = registry.descriptor_at(DeviceId::from_index(1)).unwrap();
    assert_eq!(BackendHandle::new(1), descriptor.backend_handle);
}

#[test]
fn failing_backend_does_not_affect_others() {
    let mut registrar = BackendRegistrar::new()
        .with_enumerator(Box::new(
            FixedEnumerator::new("first", "ALSA").with_device("In 1", Direction::Input),
        ))
        .with_enumerator(Box::new(FailingEnumerator))
        .with_enumerator(Box::new(
            FixedEnumerator::new("third", "JACK").with_device("Out 3", Direction::Output),
        ));
    let mut registry = DeviceRegistry::new();
    assert_eq!(2, registrar.populate(&mut registry));
    assert_eq!(
        DeviceId::from_index(1),
        registry.first_matching(Direction::Output)
    );
}

#[test]
fn only_failing_backends_result_in_empty_registry() {
    let mut registrar = BackendRegistrar::new().with_enumerator(Box::new(FailingEnumerator));
    let mut registry = DeviceRegistry::new();
    assert!(registry.ensure_initialized(&mut registrar));
    assert!(registry.is_empty());
}

#[test]
fn terminate_in_reverse_order() {
    let calls = CallLog::default();
    let mut registrar = BackendRegistrar::new()
        .with_enumerator(Box::new(LoggingEnumerator {
            name: "first",
            calls: Arc::clone(&calls),
        }))
        .with_enumerator(Box::new(LoggingEnumerator {
            name: "second",
            calls: Arc::clone(&calls),
        }));
    assert_eq!(2, registrar.len());
    let mut registry = DeviceRegistry::new();
    registrar.populate(&mut registry);
    registrar.terminate();
    assert_eq!(
        vec![
            "enumerate first",
            "enumerate second",
            "terminate second",
            "terminate first",
        ],
        *calls.lock().unwrap()
    );
}

#[cfg(feature = "midir")]
#[test]
fn default_backends() {
    let registrar = BackendRegistrar::with_default_backends();
    assert_eq!(1, registrar.len());
}

#[test]
fn new_registrar_is_empty() {
    assert!(BackendRegistrar::new().is_empty());
}
