//! Property-based tests for the component registry and fold.

mod common;

use std::collections::HashSet;

use common::Fixed;
use confluent::{ComponentSlot, ConfigManager, Configuration, RegistryError};
use proptest::prelude::*;
use serde_json::{json, Value};

fn name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["A", "B", "C", "D", "a", "b", "E"]).prop_map(str::to_string)
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["k1", "k2", "k3", "k4"]).prop_map(str::to_string)
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ]
}

fn initial_strategy() -> impl Strategy<Value = Configuration> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..4)
        .prop_map(|entries| entries.into_iter().collect())
}

fn registrations() -> impl Strategy<Value = Vec<(String, String, Value)>> {
    prop::collection::vec((name_strategy(), key_strategy(), value_strategy()), 0..12)
}

proptest! {
    /// Property: Registered names are unique and keep registration order
    ///
    /// A rejected duplicate leaves the registry exactly as it was.
    #[test]
    fn prop_names_unique_and_ordered(regs in registrations()) {
        let mut manager = ConfigManager::new(Configuration::new());
        let mut expected: Vec<String> = Vec::new();

        for (name, key, value) in regs {
            let result = manager.add_component(ComponentSlot::shared(Fixed::new(name.clone(), key, value)));
            if expected.contains(&name) {
                let is_duplicate = matches!(result, Err(RegistryError::DuplicateComponent { .. }));
                prop_assert!(is_duplicate);
            } else {
                prop_assert!(result.is_ok());
                expected.push(name);
            }
        }

        let names: Vec<&str> = manager.component_names().collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        prop_assert_eq!(unique.len(), names.len());
        prop_assert_eq!(names, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    /// Property: For every key, the last registered writer wins
    #[test]
    fn prop_last_writer_wins(initial in initial_strategy(), regs in registrations()) {
        let mut manager = ConfigManager::new(initial.clone());
        let mut expected = initial;

        for (name, key, value) in regs {
            if manager
                .add_component(ComponentSlot::shared(Fixed::new(name, key.clone(), value.clone())))
                .is_ok()
            {
                expected.insert(key, value);
            }
        }

        prop_assert_eq!(manager.configure_config().unwrap(), expected);
    }

    /// Property: Folding never mutates the initial configuration
    #[test]
    fn prop_initial_configuration_untouched(initial in initial_strategy(), regs in registrations()) {
        let mut manager = ConfigManager::new(initial.clone());
        for (name, key, value) in regs {
            let _ = manager.add_component(ComponentSlot::shared(Fixed::new(name, key, json!([value]))));
        }

        let first = manager.configure_config().unwrap();
        let second = manager.configure_config().unwrap();

        prop_assert_eq!(manager.initial_configuration(), &initial);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_one_outcome_per_component(regs in registrations()) {
        let mut manager = ConfigManager::new(Configuration::new());
        for (name, key, value) in regs {
            let _ = manager.add_component(ComponentSlot::shared(Fixed::new(name, key, value)));
        }

        let report = manager.fold().unwrap();
        prop_assert_eq!(report.outcomes.len(), manager.len());
        for (position, outcome) in report.outcomes.iter().enumerate() {
            prop_assert_eq!(outcome.position, position);
            prop_assert!(outcome.is_applied());
        }
    }
}
