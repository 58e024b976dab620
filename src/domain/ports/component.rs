//! The component port and the context handed to components during a fold

use anyhow::Result;

use crate::domain::models::configuration::{ConfigPatch, Configuration};

/// Port for a pluggable configuration contributor
///
/// A component inspects the configuration accumulated so far, decides whether
/// it applies, and returns a patch of new or overriding top-level entries.
/// Components are registered with a
/// [`ConfigManager`](crate::services::ConfigManager), which applies them in
/// registration order.
///
/// Only [`configure`](Self::configure) is mandatory.
/// [`is_enabled`](Self::is_enabled) defaults to always enabled.
///
/// # Naming
///
/// A component's name is its uniqueness key. It is resolved at the type level
/// by [`type_name`](Self::type_name), which defaults to the short type name.
/// [`name`](Self::name) defaults to the same value, so overriding
/// `type_name` renames the component whether it is registered by type or as
/// an instance, and registering by type never builds an instance.
///
/// Override `name` only for components whose name is chosen per instance at
/// runtime. Such components are registered as instances or through a named
/// factory.
///
/// # Examples
///
/// ```
/// use confluent::domain::models::{ConfigPatch, Configuration};
/// use confluent::domain::ports::{ComponentContext, ConfigComponent};
///
/// struct Verbose;
///
/// impl ConfigComponent for Verbose {
///     fn type_name() -> String {
///         "verbose".to_string()
///     }
///
///     fn is_enabled(&self, config: &Configuration, _ctx: &ComponentContext<'_>) -> anyhow::Result<bool> {
///         Ok(config.get_str("env") == Some("dev"))
///     }
///
///     fn configure(&self, _config: &Configuration, _ctx: &ComponentContext<'_>) -> anyhow::Result<ConfigPatch> {
///         Ok(Configuration::new().with("log_level", "debug"))
///     }
/// }
///
/// assert_eq!(Verbose::type_name(), "verbose");
/// assert_eq!(Verbose.name(), "verbose");
/// ```
pub trait ConfigComponent: TypeNamed + Send + Sync {
    /// Name shared by every instance of this type.
    ///
    /// Two components with equal names are duplicates regardless of their
    /// concrete types. Comparison is exact and case-sensitive.
    fn type_name() -> String
    where
        Self: Sized,
    {
        short_type_name::<Self>()
    }

    /// Unique key of this component within a manager
    fn name(&self) -> String {
        self.component_type_name()
    }

    /// Whether this component contributes to the current fold.
    ///
    /// `config` is the working configuration after every earlier component
    /// has been applied. Must be deterministic for a given input.
    fn is_enabled(&self, _config: &Configuration, _ctx: &ComponentContext<'_>) -> Result<bool> {
        Ok(true)
    }

    /// Produce the entries this component contributes.
    ///
    /// Returned entries overwrite existing top-level keys of the working
    /// configuration. Errors abort the fold and reach the caller unchanged.
    fn configure(&self, config: &Configuration, ctx: &ComponentContext<'_>) -> Result<ConfigPatch>;
}

/// Object-safe access to [`ConfigComponent::type_name`]
///
/// Implemented for every sized component; it lets the default
/// [`ConfigComponent::name`] reach the type-level name through `&self`.
pub trait TypeNamed {
    /// The implementing type's [`ConfigComponent::type_name`]
    fn component_type_name(&self) -> String;
}

impl<T: ConfigComponent> TypeNamed for T {
    fn component_type_name(&self) -> String {
        T::type_name()
    }
}

impl<T: ConfigComponent + ?Sized> ConfigComponent for Box<T> {
    fn type_name() -> String {
        short_type_name::<T>()
    }

    fn name(&self) -> String {
        (**self).name()
    }

    fn is_enabled(&self, config: &Configuration, ctx: &ComponentContext<'_>) -> Result<bool> {
        (**self).is_enabled(config, ctx)
    }

    fn configure(&self, config: &Configuration, ctx: &ComponentContext<'_>) -> Result<ConfigPatch> {
        (**self).configure(config, ctx)
    }
}

impl<T: ConfigComponent + ?Sized> ConfigComponent for std::sync::Arc<T> {
    fn type_name() -> String {
        short_type_name::<T>()
    }

    fn name(&self) -> String {
        (**self).name()
    }

    fn is_enabled(&self, config: &Configuration, ctx: &ComponentContext<'_>) -> Result<bool> {
        (**self).is_enabled(config, ctx)
    }

    fn configure(&self, config: &Configuration, ctx: &ComponentContext<'_>) -> Result<ConfigPatch> {
        (**self).configure(config, ctx)
    }
}

/// Port for producing a fresh component instance on every fold
///
/// This is the registration form for components that must not carry state
/// from one fold to the next. The name is resolved from the factory itself,
/// so registering never requires building an instance.
pub trait ComponentFactory: Send + Sync {
    /// Name of the components this factory produces
    fn name(&self) -> String;

    /// Build a brand-new instance
    fn create(&self) -> Box<dyn ConfigComponent>;
}

/// Read-only view of a manager handed to components
#[derive(Debug, Clone)]
pub struct ManagerView<'a> {
    initial: &'a Configuration,
    names: Vec<&'a str>,
}

impl<'a> ManagerView<'a> {
    /// Build a view over an initial configuration and ordered component names
    pub const fn new(initial: &'a Configuration, names: Vec<&'a str>) -> Self {
        Self { initial, names }
    }

    /// The manager's stored initial configuration
    pub const fn initial_configuration(&self) -> &'a Configuration {
        self.initial
    }

    /// Registered component names in registration order
    pub fn component_names(&self) -> &[&'a str] {
        &self.names
    }

    /// Number of registered components
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no component is registered
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether a component with this exact name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| *n == name)
    }

    /// Registration position of a component
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| *n == name)
    }
}

/// Context passed to a component while its manager folds
///
/// Replaces a stored back-reference: the manager view is only reachable
/// through a registered component's context, so it can never be observed
/// unset.
#[derive(Debug, Clone, Copy)]
pub struct ComponentContext<'a> {
    manager: &'a ManagerView<'a>,
    name: &'a str,
    position: usize,
}

impl<'a> ComponentContext<'a> {
    /// Bind a registered component's name and position to a manager view
    pub const fn new(manager: &'a ManagerView<'a>, name: &'a str, position: usize) -> Self {
        Self {
            manager,
            name,
            position,
        }
    }

    /// The owning manager
    pub const fn manager(&self) -> &'a ManagerView<'a> {
        self.manager
    }

    /// Name this component was registered under
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Zero-based registration position
    pub const fn position(&self) -> usize {
        self.position
    }
}

/// Short name of a type: the last path segment, with generic arguments
/// shortened the same way.
///
/// `my_app::layers::Overrides<my_app::Env>` becomes `Overrides<Env>`.
pub fn short_type_name<T: ?Sized>() -> String {
    shorten_type_path(std::any::type_name::<T>())
}

fn shorten_type_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut segment_start = 0;
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                out.truncate(segment_start);
            }
            c if c.is_alphanumeric() || c == '_' => out.push(c),
            c => {
                out.push(c);
                segment_start = out.len();
            }
        }
    }

    out
}
