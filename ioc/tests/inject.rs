use mini_container::{parameters_of, Container, HasContainer, Inject, ParameterList};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// --- Test Fixtures ---

#[derive(Debug)]
struct Foo {
  name: String,
}

struct Baz {
  foo: Arc<Foo>,
}

struct Subject {
  container: Container,
}

impl HasContainer for Subject {
  fn container(&self) -> &Container {
    &self.container
  }
}

fn test_container() -> (Container, Arc<Foo>) {
  let container = Container::new();
  container
    .add_instance(Foo {
      name: "foo".to_string(),
    })
    .unwrap();
  container
    .single_tagged("bar", |_, _| {
      Ok(Foo {
        name: "bar".to_string(),
      })
    })
    .unwrap();
  container
    .factory(|_, params: &ParameterList| {
      Ok(Baz {
        foo: params.get::<Arc<Foo>>(0)?.clone(),
      })
    })
    .unwrap();
  let foo = container.get::<Foo>().unwrap();
  (container, foo)
}

// --- Inject Tests ---

#[test]
fn test_inject() {
  let (container, foo) = test_container();
  let subject = Subject { container };

  let injected: Inject<Foo> = subject.inject();

  assert!(Arc::ptr_eq(injected.get().unwrap(), &foo));
}

#[test]
fn test_inject_with_params() {
  let (container, foo) = test_container();
  let subject = Subject { container };

  let baz: Inject<Baz> = subject.inject_with(None, parameters_of![foo.clone()]);

  assert!(Arc::ptr_eq(&baz.get().unwrap().foo, &foo));
}

#[test]
fn test_inject_with_tags() {
  let (container, _) = test_container();
  let subject = Subject { container };

  let foo: Inject<Foo> = subject.inject();
  let foo_bar: Inject<Foo> = subject.inject_tagged("bar");

  assert_eq!(foo.get().unwrap().name, "foo");
  assert_eq!(foo_bar.get().unwrap().name, "bar");
}

#[test]
fn test_inject_resolves_once() {
  // Arrange
  let builds = Arc::new(AtomicUsize::new(0));
  let container = Container::new();
  let counter = builds.clone();
  container
    .add_transient(move || {
      counter.fetch_add(1, Ordering::SeqCst);
      Foo {
        name: "fresh".to_string(),
      }
    })
    .unwrap();
  let lazy: Inject<Foo> = container.inject();

  // Act & Assert: nothing happens until first access.
  assert_eq!(builds.load(Ordering::SeqCst), 0);
  let first = lazy.get().unwrap().clone();
  let second = lazy.get().unwrap().clone();
  assert_eq!(builds.load(Ordering::SeqCst), 1);
  assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_inject_keeps_value_after_container_changes() {
  let container = Container::new();
  container.add_transient(|| 1_u8).unwrap();
  let lazy: Inject<u8> = container.inject();
  assert_eq!(**lazy.get().unwrap(), 1);

  container.register_factory(None, true, |_, _| Ok(2_u8)).unwrap();

  assert_eq!(**lazy.get().unwrap(), 1);
  assert_eq!(*container.get::<u8>().unwrap(), 2);
}

#[test]
fn test_inject_retries_after_failure() {
  let container = Container::new();
  let lazy: Inject<Foo> = container.inject();

  assert!(lazy.get().is_err());
  assert!(!lazy.is_resolved());

  container
    .add_instance(Foo {
      name: "late".to_string(),
    })
    .unwrap();
  assert_eq!(lazy.get().unwrap().name, "late");
}

#[test]
fn test_resolve_shortcuts() {
  let (container, foo) = test_container();
  let subject = Subject { container };

  assert!(Arc::ptr_eq(&subject.resolve::<Foo>().unwrap(), &foo));
  assert_eq!(subject.resolve_tagged::<Foo>("bar").unwrap().name, "bar");
  let baz = subject
    .resolve_with::<Baz>(None, &parameters_of![foo.clone()])
    .unwrap();
  assert!(Arc::ptr_eq(&baz.foo, &foo));
}
