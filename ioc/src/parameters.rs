//! Constructor-style parameters passed to definitions at resolution time.

use crate::error::ParameterError;
use crate::key::{Key, Tag};
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
struct Parameter {
  type_name: &'static str,
  value: Arc<dyn Any + Send + Sync>,
}

/// An ordered list of values handed to a definition when it is invoked.
///
/// The list is assembled by the caller with [`with`](ParameterList::with) or
/// the [`parameters_of!`](crate::parameters_of) macro and is read-only once it
/// reaches a definition. Reads that do not match the list's contents return a
/// [`ParameterError`].
///
/// ```
/// use mini_container::parameters_of;
///
/// let params = parameters_of!["movie", 42_u32];
/// assert_eq!(params.get::<&str>(0).unwrap(), &"movie");
/// assert_eq!(params.first::<u32>().unwrap(), &42);
/// assert!(params.get::<u32>(2).is_err());
/// ```
#[derive(Clone, Default)]
pub struct ParameterList {
  values: Vec<Parameter>,
}

impl ParameterList {
  /// Creates an empty list.
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends `value`, returning the extended list.
  pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
    self.values.push(Parameter {
      type_name: type_name::<T>(),
      value: Arc::new(value),
    });
    self
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Returns the value at `index`, which must be a `T`.
  pub fn get<T: Any>(&self, index: usize) -> Result<&T, ParameterError> {
    let parameter = self
      .values
      .get(index)
      .ok_or_else(|| ParameterError::IndexOutOfRange {
        index,
        list: self.to_string(),
      })?;
    parameter
      .value
      .downcast_ref::<T>()
      .ok_or_else(|| ParameterError::WrongType {
        index,
        expected: type_name::<T>(),
        list: self.to_string(),
      })
  }

  /// Returns the first value that is a `T`.
  pub fn first<T: Any>(&self) -> Result<&T, ParameterError> {
    self
      .values
      .iter()
      .find_map(|parameter| parameter.value.downcast_ref::<T>())
      .ok_or_else(|| ParameterError::NoValueOfType {
        expected: type_name::<T>(),
        list: self.to_string(),
      })
  }
}

impl fmt::Display for ParameterList {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("ParameterList[")?;
    for (i, parameter) in self.values.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      f.write_str(parameter.type_name)?;
    }
    f.write_str("]")
  }
}

impl fmt::Debug for ParameterList {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }
}

static EMPTY: once_cell::sync::Lazy<ParameterList> = once_cell::sync::Lazy::new(ParameterList::new);

/// Parameters to use for each registration during a
/// [dry run](crate::Container::dry_run), looked up by registration key.
#[derive(Clone, Debug, Default)]
pub struct DryRunParameters {
  parameters: HashMap<Key, ParameterList>,
}

impl DryRunParameters {
  pub fn new() -> Self {
    Self::default()
  }

  /// Supplies `parameters` for the untagged registration of `T`.
  pub fn params_for<T: ?Sized + Any>(&mut self, parameters: ParameterList) -> &mut Self {
    self.parameters.insert(Key::of::<T>(), parameters);
    self
  }

  /// Supplies `parameters` for the registration of `T` under `tag`.
  pub fn params_for_tagged<T: ?Sized + Any>(
    &mut self,
    tag: impl Into<Tag>,
    parameters: ParameterList,
  ) -> &mut Self {
    self.parameters.insert(Key::tagged::<T>(tag), parameters);
    self
  }

  /// The parameters for `key`, or an empty list when none were supplied.
  pub fn for_key(&self, key: &Key) -> &ParameterList {
    self.parameters.get(key).unwrap_or(&EMPTY)
  }
}
