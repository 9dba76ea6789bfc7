use mini_container::{check, check_with, module, parameters_of, Container, DryRunParameters, Error, Module, ParameterList};
use std::sync::Arc;

// --- Test Fixtures ---

struct Foo;

struct Baz {
  foo: Arc<Foo>,
}

struct Movie {
  id: u32,
}

// A module declared as a type rather than a closure.
struct MovieModule;

impl Module for MovieModule {
  fn register_types(&self, container: &Container) -> mini_container::Result<()> {
    container.factory(|_, params: &ParameterList| {
      Ok(Movie {
        id: *params.get::<u32>(0)?,
      })
    })
  }
}

// --- Module Tests ---

#[test]
fn test_loads_modules() {
  // Arrange
  let foo_module = module(|c: &Container| c.add_singleton(|| Foo));
  let baz_module = module(|c: &Container| c.single(|c: &Container, _| Ok(Baz { foo: c.get()? })));
  let container = Container::new();

  // Act
  container.register(&[&foo_module, &baz_module]).unwrap();

  // Assert
  let baz = container.get::<Baz>().unwrap();
  let foo = container.get::<Foo>().unwrap();
  assert!(Arc::ptr_eq(&baz.foo, &foo));
}

#[test]
fn test_register_stops_at_first_failure() {
  let foo_module = module(|c: &Container| c.add_singleton(|| Foo));
  let movie_module = MovieModule;
  let container = Container::new();

  let result = container.register(&[&foo_module, &foo_module, &movie_module]);

  assert!(matches!(result, Err(Error::TypeAlreadyRegistered { .. })));
  // The module after the failing one was never applied.
  assert!(!container.is_registered::<Movie>(None));
}

#[test]
fn test_check_dry_runs_module_in_isolation() {
  let baz_module = module(|c: &Container| c.factory(|c: &Container, _| Ok(Baz { foo: c.get()? })));

  let error = check(&baz_module, &DryRunParameters::new()).unwrap_err();

  assert!(matches!(error, Error::ResolutionFailure { .. }));
}

#[test]
fn test_check_with_parameters() {
  assert!(matches!(
    check(&MovieModule, &DryRunParameters::new()),
    Err(Error::Parameter(_))
  ));

  check_with(&MovieModule, |p| {
    p.params_for::<Movie>(parameters_of![7_u32]);
  })
  .unwrap();
}

#[test]
fn test_check_does_not_touch_caller_containers() {
  let container = Container::new();
  container.register(&[&MovieModule]).unwrap();

  check_with(&MovieModule, |p| {
    p.params_for::<Movie>(parameters_of![7_u32]);
  })
  .unwrap();

  let movie = container
    .resolve::<Movie>(None, &parameters_of![3_u32])
    .unwrap();
  assert_eq!(movie.id, 3);
}
