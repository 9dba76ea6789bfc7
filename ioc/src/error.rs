//! Error types returned by registration, resolution and dry runs.

use crate::key::Key;
use std::fmt::Write as _;
use thiserror::Error;

/// A failed access into a [`ParameterList`](crate::ParameterList).
///
/// These describe a caller mistake (the parameters handed to a resolution
/// do not match what the definition reads) and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
  #[error("Can't get parameter value #{index} from {list}")]
  IndexOutOfRange { index: usize, list: String },

  #[error("Parameter value #{index} in {list} is not of type {expected}")]
  WrongType {
    index: usize,
    expected: &'static str,
    list: String,
  },

  #[error("No parameter value of type {expected} in {list}")]
  NoValueOfType { expected: &'static str, list: String },
}

/// The main error type for `mini_container`.
#[derive(Debug, Error)]
pub enum Error {
  /// No binding for `key` exists in the container or any of its ancestors.
  /// `required_by` lists the keys whose definitions were being built when the
  /// lookup failed, innermost first.
  #[error("{}", resolution_message(.key, .required_by))]
  ResolutionFailure { key: Key, required_by: Vec<Key> },

  #[error("Type {key} is already registered in this container, set override = true if intended")]
  TypeAlreadyRegistered { key: Key },

  #[error(transparent)]
  Parameter(#[from] ParameterError),

  #[error("Circular dependency detected while resolving type {key}")]
  CircularDependency { key: Key },

  /// A user-supplied definition failed for its own reasons.
  #[error("Definition failed: {0}")]
  Definition(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn unresolved(key: Key) -> Self {
    Error::ResolutionFailure {
      key,
      required_by: Vec::new(),
    }
  }

  /// Wraps an arbitrary error raised inside a definition.
  pub fn definition<E>(error: E) -> Self
  where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
  {
    Error::Definition(error.into())
  }

  /// The unresolved key, if this is a resolution failure.
  pub fn unresolved_key(&self) -> Option<&Key> {
    match self {
      Error::ResolutionFailure { key, .. } => Some(key),
      _ => None,
    }
  }

  // Records that the definition for `dependent` could not be built because of
  // this failure. Only resolution failures carry a chain.
  pub(crate) fn required_by(self, dependent: &Key) -> Self {
    match self {
      Error::ResolutionFailure {
        key,
        mut required_by,
      } => {
        required_by.push(dependent.clone());
        Error::ResolutionFailure { key, required_by }
      }
      other => other,
    }
  }
}

fn resolution_message(key: &Key, required_by: &[Key]) -> String {
  let mut message = format!("Unable to resolve type {}", key);
  for dependent in required_by {
    let _ = write!(message, ", required by {}", dependent);
  }
  message
}

/// A specialized `Result` type for `mini_container` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
