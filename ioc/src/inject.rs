//! Capability passing for consumers of a container.

use crate::container::Container;
use crate::error::Result;
use crate::key::Tag;
use crate::parameters::ParameterList;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Implemented by types that are handed a container by their composition
/// root. Provides resolution shortcuts and lazy [`Inject`] handles.
///
/// ```
/// use mini_container::{Container, HasContainer, Inject};
///
/// struct Checkout;
///
/// struct MovieStore {
///   container: Container,
/// }
///
/// impl HasContainer for MovieStore {
///   fn container(&self) -> &Container {
///     &self.container
///   }
/// }
///
/// let container = Container::new();
/// container.add_singleton(|| Checkout).unwrap();
///
/// let store = MovieStore { container };
/// let checkout: Inject<Checkout> = store.inject();
/// assert!(!checkout.is_resolved());
/// assert!(checkout.get().is_ok());
/// assert!(checkout.is_resolved());
/// ```
pub trait HasContainer {
  fn container(&self) -> &Container;

  fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
    self.container().get()
  }

  fn resolve_tagged<T: Any + Send + Sync>(&self, tag: impl Into<Tag>) -> Result<Arc<T>> {
    self.container().get_tagged(tag)
  }

  fn resolve_with<T: Any + Send + Sync>(&self, tag: Option<Tag>, parameters: &ParameterList) -> Result<Arc<T>> {
    self.container().resolve(tag, parameters)
  }

  fn inject<T: Any + Send + Sync>(&self) -> Inject<T> {
    Inject::new(self.container().clone(), None, ParameterList::new())
  }

  fn inject_tagged<T: Any + Send + Sync>(&self, tag: impl Into<Tag>) -> Inject<T> {
    Inject::new(self.container().clone(), Some(tag.into()), ParameterList::new())
  }

  fn inject_with<T: Any + Send + Sync>(&self, tag: Option<Tag>, parameters: ParameterList) -> Inject<T> {
    Inject::new(self.container().clone(), tag, parameters)
  }
}

impl HasContainer for Container {
  fn container(&self) -> &Container {
    self
  }
}

/// A value resolved from a container on first access and cached afterwards.
///
/// The tag and parameters are fixed when the handle is created. Once a value
/// has been resolved it is never re-resolved, even if the container's
/// bindings change. A failed resolution is not cached.
pub struct Inject<T> {
  container: Container,
  tag: Option<Tag>,
  parameters: ParameterList,
  value: OnceCell<Arc<T>>,
}

impl<T: Any + Send + Sync> Inject<T> {
  pub fn new(container: Container, tag: Option<Tag>, parameters: ParameterList) -> Self {
    Self {
      container,
      tag,
      parameters,
      value: OnceCell::new(),
    }
  }

  pub fn get(&self) -> Result<&Arc<T>> {
    self
      .value
      .get_or_try_init(|| self.container.resolve(self.tag.clone(), &self.parameters))
  }

  pub fn is_resolved(&self) -> bool {
    self.value.get().is_some()
  }
}

impl<T> fmt::Debug for Inject<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Inject")
      .field("type", &std::any::type_name::<T>())
      .field("tag", &self.tag)
      .field("parameters", &self.parameters)
      .field("resolved", &self.value.get().is_some())
      .finish()
  }
}
