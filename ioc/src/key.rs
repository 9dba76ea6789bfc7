//! Registration keys: a target type plus an optional [`Tag`].

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// Object-safe view of a tag value so that tags of any type can share one map.
trait TagValue: Any + Send + Sync {
  fn as_any(&self) -> &dyn Any;
  fn eq_tag(&self, other: &dyn TagValue) -> bool;
  fn hash_tag(&self, state: &mut dyn Hasher);
  fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
  fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T> TagValue for T
where
  T: Eq + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static,
{
  fn as_any(&self) -> &dyn Any {
    self
  }

  fn eq_tag(&self, other: &dyn TagValue) -> bool {
    other
      .as_any()
      .downcast_ref::<T>()
      .map_or(false, |other| self == other)
  }

  fn hash_tag(&self, mut state: &mut dyn Hasher) {
    TypeId::of::<T>().hash(&mut state);
    self.hash(&mut state);
  }

  fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }

  fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

/// A secondary discriminator distinguishing several bindings of one type.
///
/// Any value with value equality, a hash and a `Display` form can be a tag.
/// Two tags are equal only when they wrap the same value type and the values
/// compare equal. String slices are stored as `String`, so `"comedy"`,
/// `Tag::new("comedy")` and `String::from("comedy")` name the same tag.
///
/// ```
/// use mini_container::Tag;
///
/// #[derive(Debug, PartialEq, Eq, Hash)]
/// struct Genre(&'static str);
///
/// impl std::fmt::Display for Genre {
///   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///     write!(f, "Genre({})", self.0)
///   }
/// }
///
/// assert_eq!(Tag::from("comedy"), Tag::from(String::from("comedy")));
/// assert_eq!(Tag::new("comedy"), Tag::from("comedy"));
/// assert_eq!(Tag::new(Genre("drama")), Tag::new(Genre("drama")));
/// assert_ne!(Tag::new(Genre("drama")), Tag::from("drama"));
/// ```
#[derive(Clone)]
pub struct Tag(Arc<dyn TagValue>);

impl Tag {
  pub fn new<T>(value: T) -> Self
  where
    T: Eq + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static,
  {
    let any: &dyn Any = &value;
    if let Some(text) = any.downcast_ref::<&'static str>() {
      return Self(Arc::new((*text).to_owned()));
    }
    Self(Arc::new(value))
  }

  /// Returns the wrapped value if it is a `T`.
  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.0.as_any().downcast_ref::<T>()
  }
}

impl PartialEq for Tag {
  fn eq(&self, other: &Self) -> bool {
    self.0.eq_tag(other.0.as_ref())
  }
}

impl Eq for Tag {}

impl Hash for Tag {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.0.hash_tag(state);
  }
}

impl fmt::Display for Tag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt_display(f)
  }
}

impl fmt::Debug for Tag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Tag(")?;
    self.0.fmt_debug(f)?;
    f.write_str(")")
  }
}

impl From<&str> for Tag {
  fn from(value: &str) -> Self {
    Self::new(value.to_owned())
  }
}

impl From<String> for Tag {
  fn from(value: String) -> Self {
    Self::new(value)
  }
}

/// Identifies a registration: the bound type and an optional tag.
///
/// Equality and hashing only consider the type identity and the tag; the
/// type name is carried for diagnostics.
#[derive(Clone)]
pub struct Key {
  type_id: TypeId,
  type_name: &'static str,
  tag: Option<Tag>,
}

impl Key {
  pub fn new<T: ?Sized + Any>(tag: Option<Tag>) -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: type_name::<T>(),
      tag,
    }
  }

  /// The untagged key for `T`.
  pub fn of<T: ?Sized + Any>() -> Self {
    Self::new::<T>(None)
  }

  pub fn tagged<T: ?Sized + Any>(tag: impl Into<Tag>) -> Self {
    Self::new::<T>(Some(tag.into()))
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn tag(&self) -> Option<&Tag> {
    self.tag.as_ref()
  }
}

impl PartialEq for Key {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id && self.tag == other.tag
  }
}

impl Eq for Key {}

impl Hash for Key {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
    self.tag.hash(state);
  }
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.tag {
      Some(tag) => write!(f, "{}, tag={}", self.type_name, tag),
      None => f.write_str(self.type_name),
    }
  }
}

impl fmt::Debug for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key({})", self)
  }
}
