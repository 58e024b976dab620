//! Registration forms for components.
//!
//! A [`ComponentSlot`] is either a factory, producing a fresh instance for
//! every fold, or a shared instance reused across folds. The distinction is
//! made explicitly at registration time.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain::models::SlotKind;
use crate::domain::ports::{ComponentFactory, ConfigComponent};

/// Factory building `T::default()`, named by [`ConfigComponent::type_name`]
pub struct TypeFactory<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypeFactory<T> {
    /// Factory for `T`
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for TypeFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ComponentFactory for TypeFactory<T>
where
    T: ConfigComponent + Default + 'static,
{
    fn name(&self) -> String {
        T::type_name()
    }

    fn create(&self) -> Box<dyn ConfigComponent> {
        Box::new(T::default())
    }
}

/// Factory backed by a closure, with an explicit name
pub struct NamedFactory<F, C> {
    name: String,
    make: F,
    _marker: PhantomData<fn() -> C>,
}

impl<F, C> NamedFactory<F, C> {
    /// Factory registering `make`'s components under `name`
    pub fn new(name: impl Into<String>, make: F) -> Self {
        Self {
            name: name.into(),
            make,
            _marker: PhantomData,
        }
    }
}

impl<F, C> ComponentFactory for NamedFactory<F, C>
where
    F: Fn() -> C + Send + Sync,
    C: ConfigComponent + 'static,
{
    fn name(&self) -> String {
        self.name.clone()
    }

    fn create(&self) -> Box<dyn ConfigComponent> {
        Box::new((self.make)())
    }
}

/// A registered component: a factory or a shared instance
pub enum ComponentSlot {
    /// Instantiated fresh on every fold; no state survives between folds
    Factory(Box<dyn ComponentFactory>),
    /// Reused as-is on every fold; any internal state persists
    Shared(Arc<dyn ConfigComponent>),
}

/// A component instance ready to be evaluated in a fold
pub enum ResolvedComponent<'a> {
    /// Built by a factory for this fold only
    Fresh(Box<dyn ConfigComponent>),
    /// The registered shared instance
    Shared(&'a Arc<dyn ConfigComponent>),
}

impl std::ops::Deref for ResolvedComponent<'_> {
    type Target = dyn ConfigComponent;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Fresh(component) => &**component,
            Self::Shared(component) => &***component,
        }
    }
}

impl ComponentSlot {
    /// Register `T` by type: a new `T::default()` is built for every fold
    pub fn of<T>() -> Self
    where
        T: ConfigComponent + Default + 'static,
    {
        Self::Factory(Box::new(TypeFactory::<T>::new()))
    }

    /// Register a closure producing a fresh component for every fold
    pub fn factory<F, C>(name: impl Into<String>, make: F) -> Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: ConfigComponent + 'static,
    {
        Self::Factory(Box::new(NamedFactory::new(name, make)))
    }

    /// Register a custom [`ComponentFactory`]
    pub fn from_factory(factory: impl ComponentFactory + 'static) -> Self {
        Self::Factory(Box::new(factory))
    }

    /// Register one instance, reused across folds
    pub fn shared(component: impl ConfigComponent + 'static) -> Self {
        Self::Shared(Arc::new(component))
    }

    /// Register an instance the caller keeps a handle to
    pub fn from_arc(component: Arc<dyn ConfigComponent>) -> Self {
        Self::Shared(component)
    }

    /// Name used for duplicate detection.
    ///
    /// Resolved without building an instance for factory slots.
    pub fn name(&self) -> String {
        match self {
            Self::Factory(factory) => factory.name(),
            Self::Shared(component) => component.name(),
        }
    }

    /// Registration form of this slot
    pub const fn kind(&self) -> SlotKind {
        match self {
            Self::Factory(_) => SlotKind::Factory,
            Self::Shared(_) => SlotKind::Shared,
        }
    }

    /// Produce a usable instance: fresh for factories, the shared one otherwise
    pub fn resolve(&self) -> ResolvedComponent<'_> {
        match self {
            Self::Factory(factory) => ResolvedComponent::Fresh(factory.create()),
            Self::Shared(component) => ResolvedComponent::Shared(component),
        }
    }
}

impl fmt::Debug for ComponentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentSlot")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

impl<T: ConfigComponent + 'static> From<Arc<T>> for ComponentSlot {
    fn from(component: Arc<T>) -> Self {
        Self::Shared(component)
    }
}

impl From<Box<dyn ComponentFactory>> for ComponentSlot {
    fn from(factory: Box<dyn ComponentFactory>) -> Self {
        Self::Factory(factory)
    }
}
