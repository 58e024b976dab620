//! Config Manager Service
//!
//! Maintains the ordered, name-unique component registry and folds every
//! registered component over the initial configuration.

use anyhow::Result;
use tracing::{debug, info, instrument, warn};

use crate::domain::error::RegistryError;
use crate::domain::models::{ComponentOutcome, Configuration, FoldReport, OutcomeState};
use crate::domain::ports::{ComponentContext, ManagerView};
use crate::services::component_slot::ComponentSlot;

/// Orchestrates layered configuration assembly
///
/// Holds an initial configuration and an ordered list of components. Each
/// call to [`configure_config`](Self::configure_config) starts from a fresh
/// copy of the initial configuration and applies every enabled component in
/// registration order, later keys overwriting earlier ones.
#[derive(Debug, Default)]
pub struct ConfigManager {
    /// Starting point of every fold, never mutated by one
    initial: Configuration,

    /// Registered components in application order
    components: Vec<ComponentSlot>,

    /// Names resolved at registration, parallel to `components`
    names: Vec<String>,
}

/// A registered component's view of its manager, available outside a fold
#[derive(Debug, Clone)]
pub struct ComponentBinding<'a> {
    view: ManagerView<'a>,
    name: &'a str,
    position: usize,
}

impl ComponentBinding<'_> {
    /// Context identical to the one the component receives during a fold
    pub const fn context(&self) -> ComponentContext<'_> {
        ComponentContext::new(&self.view, self.name, self.position)
    }
}

impl ConfigManager {
    /// Create a manager with no components
    pub fn new(initial: Configuration) -> Self {
        Self {
            initial,
            components: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Create a manager and register `components` in order.
    ///
    /// Fails on the first duplicate name, exactly like repeated
    /// [`add_component`](Self::add_component) calls would.
    pub fn with_components<I>(initial: Configuration, components: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = ComponentSlot>,
    {
        let mut manager = Self::new(initial);
        manager.add_components(components)?;
        Ok(manager)
    }

    /// Register a component.
    ///
    /// The name is resolved once, here. If a component with the same name is
    /// already registered the registry is left unchanged and
    /// [`RegistryError::DuplicateComponent`] is returned.
    #[instrument(skip(self, component))]
    pub fn add_component(&mut self, component: impl Into<ComponentSlot>) -> Result<(), RegistryError> {
        let component = component.into();
        let name = component.name();

        if self.contains(&name) {
            warn!(component = %name, "Rejecting duplicate component");
            return Err(RegistryError::DuplicateComponent { name });
        }

        info!(
            component = %name,
            kind = component.kind().as_str(),
            position = self.components.len(),
            "Registering component"
        );

        self.components.push(component);
        self.names.push(name);
        Ok(())
    }

    /// Register several components in order.
    ///
    /// Not transactional: stops at the first duplicate, and components
    /// registered before it stay registered.
    pub fn add_components<I>(&mut self, components: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = ComponentSlot>,
    {
        for component in components {
            self.add_component(component)?;
        }
        Ok(())
    }

    /// Registered components in registration order
    pub fn components(&self) -> &[ComponentSlot] {
        &self.components
    }

    /// Registered component names in registration order
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Whether a component with this exact name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Number of registered components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no component is registered
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The configuration every fold starts from
    pub const fn initial_configuration(&self) -> &Configuration {
        &self.initial
    }

    /// Look up the manager binding of a registered component.
    ///
    /// Fails with [`RegistryError::UnboundComponent`] if `name` has not been
    /// registered.
    pub fn binding(&self, name: &str) -> Result<ComponentBinding<'_>, RegistryError> {
        let position = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| RegistryError::UnboundComponent {
                name: name.to_string(),
            })?;

        Ok(ComponentBinding {
            view: self.view(),
            name: &self.names[position],
            position,
        })
    }

    /// Fold all components and return the resulting configuration.
    ///
    /// Any error raised by a component aborts the fold and is returned as-is;
    /// no partial configuration is produced.
    pub fn configure_config(&self) -> Result<Configuration> {
        self.fold().map(FoldReport::into_configuration)
    }

    /// Fold all components, recording what each one did.
    #[instrument(skip(self), fields(components = self.components.len()))]
    pub fn fold(&self) -> Result<FoldReport> {
        let view = self.view();
        let mut working = self.initial.clone();
        let mut outcomes = Vec::with_capacity(self.components.len());

        for (position, (slot, name)) in self.components.iter().zip(&self.names).enumerate() {
            let component = slot.resolve();
            let ctx = ComponentContext::new(&view, name, position);

            let enabled = component
                .is_enabled(&working, &ctx)
                .inspect_err(|err| {
                    debug!(component = %name, position, error = %err, "Enablement check failed");
                })?;

            let state = if enabled {
                let patch = component
                    .configure(&working, &ctx)
                    .inspect_err(|err| {
                        debug!(component = %name, position, error = %err, "Component failed");
                    })?;
                let keys = working.apply(patch);
                debug!(component = %name, position, keys = ?keys, "Component applied");
                OutcomeState::Applied { keys }
            } else {
                debug!(component = %name, position, "Component disabled, skipping");
                OutcomeState::Disabled
            };

            outcomes.push(ComponentOutcome {
                name: name.clone(),
                position,
                kind: slot.kind(),
                state,
            });
        }

        Ok(FoldReport {
            configuration: working,
            outcomes,
        })
    }

    fn view(&self) -> ManagerView<'_> {
        ManagerView::new(
            &self.initial,
            self.names.iter().map(String::as_str).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ConfigPatch;
    use crate::domain::ports::ConfigComponent;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Contributes a single fixed entry under a chosen name
    struct Fixed {
        name: &'static str,
        key: &'static str,
        value: i64,
    }

    impl ConfigComponent for Fixed {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn configure(&self, _config: &Configuration, _ctx: &ComponentContext<'_>) -> Result<ConfigPatch> {
            Ok(Configuration::new().with(self.key, self.value))
        }
    }

    fn fixed(name: &'static str, key: &'static str, value: i64) -> ComponentSlot {
        ComponentSlot::shared(Fixed { name, key, value })
    }

    /// Records the manager view it was given
    #[derive(Default)]
    struct Introspect;

    impl ConfigComponent for Introspect {
        fn configure(&self, _config: &Configuration, ctx: &ComponentContext<'_>) -> Result<ConfigPatch> {
            Ok(Configuration::new()
                .with("self", ctx.name())
                .with("position", ctx.position())
                .with("registered", ctx.manager().component_names().to_vec())
                .with("initial_len", ctx.manager().initial_configuration().len()))
        }
    }

    #[test]
    fn test_new_manager_is_empty() {
        let manager = ConfigManager::new(Configuration::new().with("x", 1));
        assert!(manager.is_empty());
        assert_eq!(manager.len(), 0);
        assert_eq!(manager.configure_config().unwrap(), Configuration::new().with("x", 1));
    }

    #[test]
    fn test_duplicate_registration_leaves_registry_unchanged() {
        let mut manager = ConfigManager::new(Configuration::new());
        manager.add_component(fixed("A", "a", 1)).unwrap();
        manager.add_component(fixed("B", "b", 2)).unwrap();

        let err = manager.add_component(fixed("A", "a", 99)).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateComponent {
                name: "A".to_string()
            }
        );
        assert_eq!(manager.component_names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(manager.components().len(), 2);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut manager = ConfigManager::new(Configuration::new());
        manager.add_component(fixed("layer", "a", 1)).unwrap();
        assert!(manager.add_component(fixed("Layer", "b", 2)).is_ok());
    }

    #[test]
    fn test_factory_and_shared_with_same_name_collide() {
        let mut manager = ConfigManager::new(Configuration::new());
        manager.add_component(ComponentSlot::of::<Introspect>()).unwrap();

        let err = manager
            .add_component(ComponentSlot::shared(Introspect))
            .unwrap_err();
        assert_eq!(err.component_name(), "Introspect");
    }

    #[test]
    fn test_batch_registration_is_not_transactional() {
        let mut manager = ConfigManager::new(Configuration::new());
        let result = manager.add_components(vec![
            fixed("A", "a", 1),
            fixed("B", "b", 2),
            fixed("A", "a", 3),
            fixed("C", "c", 4),
        ]);

        assert!(matches!(
            result,
            Err(RegistryError::DuplicateComponent { ref name }) if name == "A"
        ));
        assert_eq!(manager.component_names().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_with_components_rejects_duplicates() {
        let result = ConfigManager::with_components(
            Configuration::new(),
            vec![fixed("A", "a", 1), fixed("A", "a", 2)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_binding_before_registration_fails() {
        let mut manager = ConfigManager::new(Configuration::new());

        let err = manager.binding("Introspect").unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnboundComponent {
                name: "Introspect".to_string()
            }
        );

        manager.add_component(ComponentSlot::of::<Introspect>()).unwrap();
        let binding = manager.binding("Introspect").unwrap();
        let ctx = binding.context();
        assert_eq!(ctx.name(), "Introspect");
        assert_eq!(ctx.position(), 0);
        assert!(ctx.manager().contains("Introspect"));
    }

    #[test]
    fn test_context_exposes_manager_view() {
        let manager = ConfigManager::with_components(
            Configuration::new().with("seed", true),
            vec![fixed("first", "a", 1), ComponentSlot::of::<Introspect>()],
        )
        .unwrap();

        let config = manager.configure_config().unwrap();
        assert_eq!(config.get("self"), Some(&json!("Introspect")));
        assert_eq!(config.get("position"), Some(&json!(1)));
        assert_eq!(config.get("registered"), Some(&json!(["first", "Introspect"])));
        assert_eq!(config.get("initial_len"), Some(&json!(1)));
    }

    #[test]
    fn test_fold_does_not_touch_initial_configuration() {
        let initial = Configuration::new().with("x", 1);
        let manager =
            ConfigManager::with_components(initial.clone(), vec![fixed("A", "x", 2)]).unwrap();

        let mut first = manager.configure_config().unwrap();
        first.insert("mutated", true);
        let second = manager.configure_config().unwrap();

        assert_eq!(manager.initial_configuration(), &initial);
        assert_eq!(second, Configuration::new().with("x", 2));
    }

    #[test]
    fn test_fold_report_records_each_component() {
        struct Never;

        impl ConfigComponent for Never {
            fn is_enabled(&self, _config: &Configuration, _ctx: &ComponentContext<'_>) -> Result<bool> {
                Ok(false)
            }

            fn configure(&self, _config: &Configuration, _ctx: &ComponentContext<'_>) -> Result<ConfigPatch> {
                unreachable!("disabled components are never configured")
            }
        }

        let manager = ConfigManager::with_components(
            Configuration::new(),
            vec![
                fixed("A", "x", 1),
                ComponentSlot::shared(Never),
                fixed("B", "x", 2),
            ],
        )
        .unwrap();

        let report = manager.fold().unwrap();
        assert_eq!(report.applied(), vec!["A", "B"]);
        assert_eq!(report.disabled(), vec!["Never"]);
        assert_eq!(report.last_writer("x"), Some("B"));
        assert_eq!(report.outcomes[1].state, OutcomeState::Disabled);
        assert_eq!(report.configuration.get("x"), Some(&json!(2)));
    }

    #[test]
    fn test_shared_instance_state_persists_across_folds() {
        struct Tally(AtomicUsize);

        impl ConfigComponent for Tally {
            fn configure(&self, _config: &Configuration, _ctx: &ComponentContext<'_>) -> Result<ConfigPatch> {
                let seen = self.0.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(Configuration::new().with("runs", seen))
            }
        }

        let tally = Arc::new(Tally(AtomicUsize::new(0)));
        let manager =
            ConfigManager::with_components(Configuration::new(), vec![ComponentSlot::from(Arc::clone(&tally))])
                .unwrap();

        assert_eq!(manager.configure_config().unwrap().get("runs"), Some(&json!(1)));
        assert_eq!(manager.configure_config().unwrap().get("runs"), Some(&json!(2)));
        assert_eq!(tally.0.load(Ordering::SeqCst), 2);
    }
}
