//! Public macros for building parameter lists and for panicking resolution.

/// Builds a [`ParameterList`](crate::ParameterList) from the given values, in
/// order.
///
/// ```
/// use mini_container::parameters_of;
///
/// let empty = parameters_of![];
/// assert!(empty.is_empty());
///
/// let params = parameters_of![String::from("star-wars"), 1977_u16];
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.first::<u16>().unwrap(), &1977);
/// ```
#[macro_export]
macro_rules! parameters_of {
  () => {
    $crate::ParameterList::new()
  };
  ($($value:expr),+ $(,)?) => {
    $crate::ParameterList::new()$(.with($value))+
  };
}

/// Resolves a service from a container, panicking if it cannot be resolved.
///
/// Intended for composition roots and tests where a missing binding is a
/// programming error. Use [`Container::get`](crate::Container::get) or
/// [`Container::resolve`](crate::Container::resolve) to handle the failure.
///
/// # Panics
///
/// Panics with the resolution error's message if the service cannot be
/// resolved.
///
/// # Examples
///
/// ```
/// use mini_container::{resolve, Container};
///
/// let container = Container::new();
/// container.add_instance(String::from("hello")).unwrap();
/// container.add_instance_tagged("farewell", String::from("goodbye")).unwrap();
///
/// assert_eq!(*resolve!(container, String), "hello");
/// assert_eq!(*resolve!(container, String, "farewell"), "goodbye");
/// ```
#[macro_export]
macro_rules! resolve {
  // resolve!(container, MyService)
  ($container:expr, $type:ty) => {
    $container
      .get::<$type>()
      .unwrap_or_else(|error| panic!("Failed to resolve required service: {}", error))
  };

  // resolve!(container, MyService, tag)
  ($container:expr, $type:ty, $tag:expr) => {
    $container
      .get_tagged::<$type>($tag)
      .unwrap_or_else(|error| panic!("Failed to resolve required service: {}", error))
  };
}
