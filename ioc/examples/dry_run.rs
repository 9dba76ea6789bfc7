use mini_container::{check_with, module, parameters_of, Container, ParameterList};
use std::sync::Arc;

struct Catalog;

struct Movie {
  id: u32,
  _catalog: Arc<Catalog>,
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let movies = module(|c: &Container| {
    c.factory(|c: &Container, params: &ParameterList| {
      Ok(Movie {
        id: *params.get::<u32>(0)?,
        _catalog: c.get()?,
      })
    })
  });

  // The module forgot to register `Catalog`, which the dry run reports.
  match check_with(&movies, |p| {
    p.params_for::<Movie>(parameters_of![1_u32]);
  }) {
    Ok(()) => panic!("validation should have failed"),
    Err(error) => println!("Validation failed as expected: {}", error),
  }

  let catalog = module(|c: &Container| c.add_singleton(|| Catalog));
  let container = Container::new();
  container
    .register(&[&catalog, &movies])
    .expect("modules register cleanly");
  container
    .dry_run_with(|p| {
      p.params_for::<Movie>(parameters_of![1_u32]);
    })
    .expect("graph is complete");

  let movie = container
    .resolve::<Movie>(None, &parameters_of![42_u32])
    .expect("movie resolves");
  println!("Resolved movie #{}", movie.id);
}
