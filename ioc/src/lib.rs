//! # Mini Container
//!
//! A small dependency-resolution container for Rust.
//!
//! Services are registered against a [`Key`]: the service type plus an
//! optional [`Tag`]. A registration is a *definition*, a function of the
//! container and a [`ParameterList`], that is invoked lazily when the key is
//! resolved.
//!
//! ## Core Concepts
//!
//! - **Singletons** are built at most once per container and shared.
//! - **Factories** are invoked on every resolution.
//! - **Child containers** delegate keys they do not bind to their parent.
//! - **Collisions** are rejected across the whole parent chain unless the
//!   registration explicitly asks to override.
//! - **Dry runs** invoke every definition up front so a missing dependency
//!   surfaces at startup instead of at first use.
//!
//! ## Quick Start
//!
//! ```
//! use mini_container::{parameters_of, Container, ParameterList};
//! use std::sync::Arc;
//!
//! struct Database {
//!   url: String,
//! }
//!
//! struct Movie {
//!   id: u32,
//!   db: Arc<Database>,
//! }
//!
//! let container = Container::new();
//! container
//!   .single(|_, _| Ok(Database { url: "postgres://localhost/movies".to_string() }))
//!   .unwrap();
//! container
//!   .factory(|c: &Container, params: &ParameterList| {
//!     Ok(Movie { id: *params.get::<u32>(0)?, db: c.get()? })
//!   })
//!   .unwrap();
//!
//! // Validate the graph, supplying the parameters `Movie` expects.
//! container
//!   .dry_run_with(|p| {
//!     p.params_for::<Movie>(parameters_of![0_u32]);
//!   })
//!   .unwrap();
//!
//! let movie = container.resolve::<Movie>(None, &parameters_of![11_u32]).unwrap();
//! assert_eq!(movie.id, 11);
//! assert_eq!(movie.db.url, "postgres://localhost/movies");
//! ```

mod container;
mod core;
mod error;
mod inject;
mod key;
mod macros;
mod module;
mod parameters;

pub use container::Container;
pub use error::{Error, ParameterError, Result};
pub use inject::{HasContainer, Inject};
pub use key::{Key, Tag};
pub use module::{check, check_with, module, Module};
pub use parameters::{DryRunParameters, ParameterList};
