//! Core, non-public data structures for the container.

use crate::container::Container;
use crate::error::{Error, Result};
use crate::key::Key;
use crate::parameters::ParameterList;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

/// A resolved value, shared between the cache and every caller.
pub(crate) type Instance = Arc<dyn Any + Send + Sync>;

/// A definition with its output type erased.
pub(crate) type ErasedDefinition =
  Arc<dyn Fn(&Container, &ParameterList) -> Result<Instance> + Send + Sync>;

pub(crate) fn erase<T, D>(definition: D) -> ErasedDefinition
where
  T: Any + Send + Sync,
  D: Fn(&Container, &ParameterList) -> Result<T> + Send + Sync + 'static,
{
  Arc::new(
    move |container: &Container, parameters: &ParameterList| -> Result<Instance> {
      Ok(Arc::new(definition(container, parameters)?))
    },
  )
}

thread_local! {
  // Singletons currently being built on this thread, per owning container.
  static RESOLVING_STACK: RefCell<HashSet<(usize, Key)>> = RefCell::new(HashSet::new());
}

/// Marks a singleton as being built for the lifetime of the guard.
///
/// Entering the same (container, key) pair twice on one thread means the
/// singleton depends on itself. Factories are not guarded: a factory may
/// resolve its own key again, for example with smaller parameters.
pub(crate) struct ResolutionGuard {
  entry: (usize, Key),
}

impl ResolutionGuard {
  pub(crate) fn enter(container_id: usize, key: &Key) -> Result<Self> {
    let entry = (container_id, key.clone());
    let inserted = RESOLVING_STACK.with(|stack| stack.borrow_mut().insert(entry.clone()));
    if !inserted {
      return Err(Error::CircularDependency { key: key.clone() });
    }
    Ok(Self { entry })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.entry);
    });
  }
}
