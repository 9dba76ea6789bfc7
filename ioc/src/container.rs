//! The main `Container` struct and its associated methods.

use crate::core::{erase, ErasedDefinition, Instance, ResolutionGuard};
use crate::error::{Error, Result};
use crate::key::{Key, Tag};
use crate::parameters::{DryRunParameters, ParameterList};
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug)]
enum Binding {
  Singleton,
  Factory,
}

#[derive(Default)]
struct Registries {
  parent: Option<Container>,
  singleton_instances: DashMap<Key, Arc<OnceCell<Instance>>>,
  singleton_definitions: DashMap<Key, ErasedDefinition>,
  factory_definitions: DashMap<Key, ErasedDefinition>,
}

/// The dependency-resolution container.
///
/// Maps a [`Key`] (type plus optional [`Tag`]) to a definition producing
/// instances of that type. Singleton definitions are invoked at most once per
/// container and their result is shared; factory definitions are invoked on
/// every resolution. Keys that are not bound locally are delegated to the
/// parent container, if any.
///
/// `Container` is a cheap handle: clones share the same registries. The
/// registries are concurrent maps, so registration and resolution take `&self`
/// and a fully registered container can be shared across threads.
///
/// # Examples
///
/// ```
/// use mini_container::{parameters_of, Container, ParameterList};
/// use std::sync::Arc;
///
/// struct Foo;
/// struct Baz {
///   foo: Arc<Foo>,
/// }
///
/// let container = Container::new();
/// container.add_singleton(|| Foo).unwrap();
/// container
///   .factory(|_, params: &ParameterList| {
///     Ok(Baz { foo: params.first::<Arc<Foo>>()?.clone() })
///   })
///   .unwrap();
///
/// let foo = container.get::<Foo>().unwrap();
/// let baz = container
///   .resolve::<Baz>(None, &parameters_of![foo.clone()])
///   .unwrap();
/// assert!(Arc::ptr_eq(&baz.foo, &foo));
/// ```
#[derive(Clone, Default)]
pub struct Container {
  inner: Arc<Registries>,
}

impl Container {
  /// Creates a new, empty root `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty container whose parent is `self`.
  ///
  /// Nothing is copied: the child sees bindings registered in its ancestors
  /// at resolution time, including ones added after the child was created.
  pub fn create_child_container(&self) -> Container {
    let child = Container {
      inner: Arc::new(Registries {
        parent: Some(self.clone()),
        ..Registries::default()
      }),
    };
    debug!(parent = self.id(), child = child.id(), "created child container");
    child
  }

  pub fn parent(&self) -> Option<&Container> {
    self.inner.parent.as_ref()
  }

  fn id(&self) -> usize {
    Arc::as_ptr(&self.inner) as usize
  }

  // --- PRIVATE HELPERS ---

  fn check_and_put(
    &self,
    binding: Binding,
    key: Key,
    override_existing: bool,
    definition: ErasedDefinition,
  ) -> Result<()> {
    if !override_existing && self.is_key_registered(&key) {
      return Err(Error::TypeAlreadyRegistered { key });
    }

    let (own, other) = match binding {
      Binding::Singleton => (
        &self.inner.singleton_definitions,
        &self.inner.factory_definitions,
      ),
      Binding::Factory => (
        &self.inner.factory_definitions,
        &self.inner.singleton_definitions,
      ),
    };
    // An override must be the binding that answers from now on.
    other.remove(&key);
    self.inner.singleton_instances.remove(&key);

    debug!(key = %key, ?binding, override_existing, "registered definition");
    own.insert(key, definition);
    Ok(())
  }

  fn cached_singleton(&self, key: &Key) -> Option<Instance> {
    self
      .inner
      .singleton_instances
      .get(key)
      .and_then(|cell| cell.value().get().cloned())
  }

  fn build_singleton(
    &self,
    key: &Key,
    definition: &ErasedDefinition,
    parameters: &ParameterList,
  ) -> Result<Instance> {
    let cell = self
      .inner
      .singleton_instances
      .entry(key.clone())
      .or_default()
      .value()
      .clone();
    // Entered before the cell so a self-dependent definition fails instead of
    // blocking on its own initialization.
    let _guard = ResolutionGuard::enter(self.id(), key)?;
    let instance = cell.get_or_try_init(|| {
      trace!(key = %key, "building singleton");
      definition(self, parameters).map_err(|error| error.required_by(key))
    })?;
    Ok(instance.clone())
  }

  fn build_factory(
    &self,
    key: &Key,
    definition: &ErasedDefinition,
    parameters: &ParameterList,
  ) -> Result<Instance> {
    trace!(key = %key, "invoking factory");
    definition(self, parameters).map_err(|error| error.required_by(key))
  }

  fn try_resolve_singleton(&self, key: &Key, parameters: &ParameterList) -> Result<Option<Instance>> {
    if let Some(instance) = self.cached_singleton(key) {
      trace!(key = %key, "resolved cached singleton");
      return Ok(Some(instance));
    }
    let Some(definition) = self
      .inner
      .singleton_definitions
      .get(key)
      .map(|entry| entry.value().clone())
    else {
      return Ok(None);
    };
    self.build_singleton(key, &definition, parameters).map(Some)
  }

  fn try_resolve_factory(&self, key: &Key, parameters: &ParameterList) -> Result<Option<Instance>> {
    let Some(definition) = self
      .inner
      .factory_definitions
      .get(key)
      .map(|entry| entry.value().clone())
    else {
      return Ok(None);
    };
    self.build_factory(key, &definition, parameters).map(Some)
  }

  pub(crate) fn resolve_key(&self, key: &Key, parameters: &ParameterList) -> Result<Instance> {
    if let Some(instance) = self.try_resolve_singleton(key, parameters)? {
      return Ok(instance);
    }
    if let Some(instance) = self.try_resolve_factory(key, parameters)? {
      return Ok(instance);
    }
    match &self.inner.parent {
      Some(parent) => {
        trace!(key = %key, parent = parent.id(), "delegating to parent");
        parent.resolve_key(key, parameters)
      }
      None => Err(Error::unresolved(key.clone())),
    }
  }

  // --- PUBLIC API ---

  // --- Registration ---

  /// Registers a singleton definition for `T` under `tag`.
  ///
  /// Fails with [`Error::TypeAlreadyRegistered`] if the key is registered in
  /// this container or any ancestor, unless `override_existing` is set. An
  /// override only replaces this container's own binding; an ancestor's
  /// binding is shadowed, never modified.
  pub fn register_singleton<T, D>(
    &self,
    tag: Option<Tag>,
    override_existing: bool,
    definition: D,
  ) -> Result<()>
  where
    T: Any + Send + Sync,
    D: Fn(&Container, &ParameterList) -> Result<T> + Send + Sync + 'static,
  {
    self.check_and_put(
      Binding::Singleton,
      Key::new::<T>(tag),
      override_existing,
      erase(definition),
    )
  }

  /// Registers a factory definition for `T` under `tag`, invoked on every
  /// resolution. Collisions are handled as in
  /// [`register_singleton`](Container::register_singleton).
  pub fn register_factory<T, D>(&self, tag: Option<Tag>, override_existing: bool, definition: D) -> Result<()>
  where
    T: Any + Send + Sync,
    D: Fn(&Container, &ParameterList) -> Result<T> + Send + Sync + 'static,
  {
    self.check_and_put(
      Binding::Factory,
      Key::new::<T>(tag),
      override_existing,
      erase(definition),
    )
  }

  pub fn single<T, D>(&self, definition: D) -> Result<()>
  where
    T: Any + Send + Sync,
    D: Fn(&Container, &ParameterList) -> Result<T> + Send + Sync + 'static,
  {
    self.register_singleton(None, false, definition)
  }

  pub fn single_tagged<T, D>(&self, tag: impl Into<Tag>, definition: D) -> Result<()>
  where
    T: Any + Send + Sync,
    D: Fn(&Container, &ParameterList) -> Result<T> + Send + Sync + 'static,
  {
    self.register_singleton(Some(tag.into()), false, definition)
  }

  pub fn factory<T, D>(&self, definition: D) -> Result<()>
  where
    T: Any + Send + Sync,
    D: Fn(&Container, &ParameterList) -> Result<T> + Send + Sync + 'static,
  {
    self.register_factory(None, false, definition)
  }

  pub fn factory_tagged<T, D>(&self, tag: impl Into<Tag>, definition: D) -> Result<()>
  where
    T: Any + Send + Sync,
    D: Fn(&Container, &ParameterList) -> Result<T> + Send + Sync + 'static,
  {
    self.register_factory(Some(tag.into()), false, definition)
  }

  /// Registers an untagged singleton built by an argument-less constructor.
  pub fn add_singleton<T: Any + Send + Sync>(
    &self,
    constructor: impl Fn() -> T + Send + Sync + 'static,
  ) -> Result<()> {
    self.single(move |_, _| Ok(constructor()))
  }

  /// Registers an untagged factory built by an argument-less constructor.
  pub fn add_transient<T: Any + Send + Sync>(
    &self,
    constructor: impl Fn() -> T + Send + Sync + 'static,
  ) -> Result<()> {
    self.factory(move |_, _| Ok(constructor()))
  }

  /// Registers an already constructed value as the untagged singleton for `T`.
  pub fn add_instance<T: Any + Send + Sync>(&self, instance: T) -> Result<()> {
    self.add_instance_internal(None, instance)
  }

  pub fn add_instance_tagged<T: Any + Send + Sync>(&self, tag: impl Into<Tag>, instance: T) -> Result<()> {
    self.add_instance_internal(Some(tag.into()), instance)
  }

  fn add_instance_internal<T: Any + Send + Sync>(&self, tag: Option<Tag>, instance: T) -> Result<()> {
    let instance: Instance = Arc::new(instance);
    let definition: ErasedDefinition =
      Arc::new(move |_: &Container, _: &ParameterList| -> Result<Instance> { Ok(instance.clone()) });
    self.check_and_put(Binding::Singleton, Key::new::<T>(tag), false, definition)
  }

  // --- Presence ---

  /// Whether `key` is bound in this container or any ancestor.
  pub fn is_key_registered(&self, key: &Key) -> bool {
    self.inner.singleton_definitions.contains_key(key)
      || self.inner.factory_definitions.contains_key(key)
      || self
        .inner
        .parent
        .as_ref()
        .map_or(false, |parent| parent.is_key_registered(key))
  }

  pub fn is_registered<T: ?Sized + Any>(&self, tag: Option<Tag>) -> bool {
    self.is_key_registered(&Key::new::<T>(tag))
  }

  // --- Resolution ---

  /// Resolves `T` under `tag`, passing `parameters` to the definition.
  ///
  /// Looks in this container's cached singletons, then its singleton
  /// definitions, then its factory definitions, and finally delegates to the
  /// parent. Parameters are ignored when a cached singleton answers.
  pub fn resolve<T: Any + Send + Sync>(&self, tag: Option<Tag>, parameters: &ParameterList) -> Result<Arc<T>> {
    let key = Key::new::<T>(tag);
    let instance = self.resolve_key(&key, parameters)?;
    // Keys pair a `TypeId` with instances of exactly that type.
    instance
      .downcast::<T>()
      .map_err(|_| Error::unresolved(key))
  }

  /// Resolves the untagged binding of `T` with no parameters.
  pub fn get<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
    self.resolve(None, &ParameterList::new())
  }

  pub fn get_tagged<T: Any + Send + Sync>(&self, tag: impl Into<Tag>) -> Result<Arc<T>> {
    self.resolve(Some(tag.into()), &ParameterList::new())
  }

  // --- Validation ---

  /// Invokes every definition registered in this container, then in each
  /// ancestor, stopping at the first failure.
  ///
  /// Each definition receives the parameters supplied for its key, or an
  /// empty list. Singletons are built through the normal path, so a
  /// successful dry run leaves them cached exactly as first resolution would;
  /// run it on a disposable container to keep a long-lived one untouched.
  pub fn dry_run(&self, parameters: &DryRunParameters) -> Result<()> {
    debug!(container = self.id(), "dry run");

    let singletons: Vec<(Key, ErasedDefinition)> = self
      .inner
      .singleton_definitions
      .iter()
      .map(|entry| (entry.key().clone(), entry.value().clone()))
      .collect();
    for (key, definition) in &singletons {
      self.build_singleton(key, definition, parameters.for_key(key))?;
    }

    let factories: Vec<(Key, ErasedDefinition)> = self
      .inner
      .factory_definitions
      .iter()
      .map(|entry| (entry.key().clone(), entry.value().clone()))
      .collect();
    for (key, definition) in &factories {
      self.build_factory(key, definition, parameters.for_key(key))?;
    }

    match &self.inner.parent {
      Some(parent) => parent.dry_run(parameters),
      None => Ok(()),
    }
  }

  /// [`dry_run`](Container::dry_run) with parameters filled in by `configure`.
  pub fn dry_run_with(&self, configure: impl FnOnce(&mut DryRunParameters)) -> Result<()> {
    let mut parameters = DryRunParameters::new();
    configure(&mut parameters);
    self.dry_run(&parameters)
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("singletons", &self.inner.singleton_definitions.len())
      .field("factories", &self.inner.factory_definitions.len())
      .field("parent", &self.inner.parent)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug)]
  struct Foo;

  #[test]
  fn cached_singleton_ignores_parameters() {
    let container = Container::new();
    container
      .single(|_, params: &ParameterList| Ok(*params.first::<u32>()?))
      .unwrap();

    let first = container
      .resolve::<u32>(None, &ParameterList::new().with(1_u32))
      .unwrap();
    let second = container.get::<u32>().unwrap();

    assert_eq!(*first, 1);
    assert!(Arc::ptr_eq(&first, &second));
  }

  #[test]
  fn failed_singleton_is_not_cached() {
    let container = Container::new();
    container
      .single(|_, params: &ParameterList| Ok(*params.first::<u32>()?))
      .unwrap();

    assert!(matches!(container.get::<u32>(), Err(Error::Parameter(_))));
    assert!(container.cached_singleton(&Key::of::<u32>()).is_none());

    let built = container
      .resolve::<u32>(None, &ParameterList::new().with(5_u32))
      .unwrap();
    assert_eq!(*built, 5);
  }

  #[test]
  fn override_evicts_cached_singleton() {
    let container = Container::new();
    container.add_singleton(|| 1_u8).unwrap();
    assert_eq!(*container.get::<u8>().unwrap(), 1);

    container.register_singleton(None, true, |_, _| Ok(2_u8)).unwrap();
    assert_eq!(*container.get::<u8>().unwrap(), 2);
  }

  #[test]
  fn override_replaces_binding_kind() {
    let container = Container::new();
    container.add_singleton(|| Foo).unwrap();
    container.register_factory(None, true, |_, _| Ok(Foo)).unwrap();

    let a = container.get::<Foo>().unwrap();
    let b = container.get::<Foo>().unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
  }

  #[test]
  fn child_does_not_cache_parent_singletons() {
    let parent = Container::new();
    parent.add_singleton(|| Foo).unwrap();
    let child = parent.create_child_container();

    let from_child = child.get::<Foo>().unwrap();
    assert!(child.cached_singleton(&Key::of::<Foo>()).is_none());
    assert!(parent.cached_singleton(&Key::of::<Foo>()).is_some());
    assert!(Arc::ptr_eq(&from_child, &parent.get::<Foo>().unwrap()));
  }

  #[test]
  fn debug_lists_counts() {
    let container = Container::new();
    container.add_singleton(|| Foo).unwrap();
    container.add_transient(|| 1_u8).unwrap();
    assert_eq!(
      format!("{:?}", container),
      "Container { singletons: 1, factories: 1, parent: None }"
    );
  }
}
