//! Grouping registrations into reusable modules.

use crate::container::Container;
use crate::error::Result;
use crate::parameters::DryRunParameters;
use tracing::debug;

/// A batch of registrations applied to a container in one go.
pub trait Module {
  fn register_types(&self, container: &Container) -> Result<()>;
}

struct FnModule<F>(F);

impl<F> Module for FnModule<F>
where
  F: Fn(&Container) -> Result<()>,
{
  fn register_types(&self, container: &Container) -> Result<()> {
    (self.0)(container)
  }
}

/// Builds a [`Module`] from a registration closure.
///
/// ```
/// use mini_container::{module, Container};
///
/// struct Foo;
///
/// let foo_module = module(|c: &Container| c.add_singleton(|| Foo));
/// let container = Container::new();
/// container.register(&[&foo_module]).unwrap();
/// assert!(container.get::<Foo>().is_ok());
/// ```
pub fn module<F>(registration: F) -> impl Module
where
  F: Fn(&Container) -> Result<()>,
{
  FnModule(registration)
}

impl Container {
  /// Applies `modules` in order, stopping at the first failed registration.
  pub fn register(&self, modules: &[&dyn Module]) -> Result<()> {
    debug!(count = modules.len(), "registering modules");
    for module in modules {
      module.register_types(self)?;
    }
    Ok(())
  }
}

/// Registers `module` into a fresh container and dry-runs it.
pub fn check(module: &dyn Module, parameters: &DryRunParameters) -> Result<()> {
  let container = Container::new();
  container.register(&[module])?;
  container.dry_run(parameters)
}

/// [`check`] with parameters filled in by `configure`.
pub fn check_with(module: &dyn Module, configure: impl FnOnce(&mut DryRunParameters)) -> Result<()> {
  let mut parameters = DryRunParameters::new();
  configure(&mut parameters);
  check(module, &parameters)
}
