use mini_container::{resolve, Container};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() -> mini_container::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let container = Container::new();

  // --- Singleton Registration ---
  // This definition will only be invoked ONCE.
  container.single_tagged("singleton_tracker", |_, _| {
    println!("Creating SINGLETON RequestTracker...");
    Ok(RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    })
  })?;

  // --- Factory Registration ---
  // This definition will be invoked EVERY time the service is resolved.
  container.factory_tagged("factory_tracker", |_, _| {
    println!("Creating FACTORY RequestTracker...");
    Ok(RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    })
  })?;

  println!("--- Resolving Singletons ---");
  let s1 = resolve!(container, RequestTracker, "singleton_tracker");
  let s2 = resolve!(container, RequestTracker, "singleton_tracker");
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert!(Arc::ptr_eq(&s1, &s2), "Singleton instances should be identical");

  println!("--- Resolving Factories ---");
  let f1 = resolve!(container, RequestTracker, "factory_tracker");
  let f2 = resolve!(container, RequestTracker, "factory_tracker");
  println!("Factory 1 ID: {}, Factory 2 ID: {}", f1.id, f2.id);
  assert_eq!(f1.id, 1);
  assert_eq!(f2.id, 2);
  assert!(!Arc::ptr_eq(&f1, &f2), "Factory instances should be different");
  Ok(())
}
