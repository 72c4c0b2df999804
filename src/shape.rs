//! Attribute introspection.
//!
//! A record type describes itself through a [`Shape`]: its type name plus an ordered
//! set of [`AttributeDescriptor`]s. Shapes replace runtime reflection. They are either
//! generated at compile time by [`record!`](crate::record) or written by hand for types
//! that need read-only attributes or fallible accessors.
//!
//! ## Invariants
//!
//! - Attribute names are unique within a shape and compared case-sensitively.
//! - Attribute order is declaration order and never changes for a given type, so CSV
//!   columns, JSON keys and XML child elements line up across records.
//! - A shape with no attributes is valid; encoders render it as an empty header, an
//!   empty object or a content-free element.
//!
//! ## Examples
//!
//! ```rust
//! use recast::{describe, record, TypeTag};
//!
//! record! {
//!     #[derive(Debug, Clone, Default)]
//!     pub struct Person {
//!         pub name: Option<String>,
//!         pub age: i32,
//!     }
//! }
//!
//! let shape = describe::<Person>();
//! assert_eq!(shape.type_name(), "Person");
//! assert_eq!(shape.names().collect::<Vec<_>>(), vec!["name", "age"]);
//! assert_eq!(shape.get("age").map(|a| a.type_tag()), Some(TypeTag::Primitive));
//! ```

use crate::{Field, Result, Value};
use indexmap::IndexMap;
use std::any::{type_name, TypeId};

/// Coarse classification of an attribute's declared type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Numbers and characters
    Primitive,
    String,
    Boolean,
    /// Dates, nested records and anything else
    Other,
}

/// Name, type and access capabilities of one attribute of a shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeDescriptor {
    name: &'static str,
    type_tag: TypeTag,
    type_id: TypeId,
    type_name: &'static str,
    can_read: bool,
    can_write: bool,
}

impl AttributeDescriptor {
    /// Describes a readable and writable attribute holding an `F`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recast::{AttributeDescriptor, TypeTag};
    ///
    /// let attr = AttributeDescriptor::of::<Option<String>>("Name");
    /// assert_eq!(attr.type_tag(), TypeTag::String);
    /// assert!(attr.can_read() && attr.can_write());
    /// ```
    #[must_use]
    pub fn of<F: Field>(name: &'static str) -> Self {
        AttributeDescriptor {
            name,
            type_tag: F::TYPE_TAG,
            type_id: TypeId::of::<F>(),
            type_name: type_name::<F>(),
            can_read: true,
            can_write: true,
        }
    }

    /// Marks the attribute as having no mutator.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.can_write = false;
        self
    }

    /// Marks the attribute as having no accessor.
    #[must_use]
    pub fn write_only(mut self) -> Self {
        self.can_read = false;
        self
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    /// Fully qualified Rust type name, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn can_read(&self) -> bool {
        self.can_read
    }

    #[must_use]
    pub fn can_write(&self) -> bool {
        self.can_write
    }

    /// `true` when both attributes declare exactly the same Rust type.
    #[must_use]
    pub fn same_type(&self, other: &AttributeDescriptor) -> bool {
        self.type_id == other.type_id
    }

    /// Case-insensitive name comparison using Unicode lowercase folding.
    #[must_use]
    pub fn name_eq_ignore_case(&self, name: &str) -> bool {
        self.name
            .chars()
            .flat_map(char::to_lowercase)
            .eq(name.chars().flat_map(char::to_lowercase))
    }
}

/// The static attribute layout of a record type.
#[derive(Clone, Debug)]
pub struct Shape {
    type_name: &'static str,
    attributes: IndexMap<&'static str, AttributeDescriptor>,
}

impl Shape {
    /// Builds a shape from attributes in declaration order.
    ///
    /// When two attributes share a name the first one is kept.
    pub fn new<I>(type_name: &'static str, attributes: I) -> Self
    where
        I: IntoIterator<Item = AttributeDescriptor>,
    {
        let mut map = IndexMap::new();
        for attribute in attributes {
            if map.contains_key(attribute.name) {
                tracing::warn!(
                    shape = type_name,
                    attribute = attribute.name,
                    "dropping duplicate attribute"
                );
                continue;
            }
            map.insert(attribute.name, attribute);
        }
        Shape {
            type_name,
            attributes: map,
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Looks an attribute up by exact, case-sensitive name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.get(name)
    }

    /// All attributes in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDescriptor> + '_ {
        self.attributes.values()
    }

    /// Attributes with an accessor, in declaration order.
    pub fn readable(&self) -> impl Iterator<Item = &AttributeDescriptor> + '_ {
        self.attributes().filter(|a| a.can_read)
    }

    /// Attributes with a mutator, in declaration order.
    pub fn writable(&self) -> impl Iterator<Item = &AttributeDescriptor> + '_ {
        self.attributes().filter(|a| a.can_write)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes.keys().copied()
    }
}

/// A type that can describe its attributes and read them by name.
///
/// Most types get this from [`record!`](crate::record). A hand-written impl looks like:
///
/// ```rust
/// use recast::{AttributeDescriptor, Error, Record, Result, Shape, Value};
/// use std::sync::OnceLock;
///
/// struct Temperature {
///     celsius: f64,
/// }
///
/// impl Record for Temperature {
///     fn shape() -> &'static Shape {
///         static SHAPE: OnceLock<Shape> = OnceLock::new();
///         SHAPE.get_or_init(|| {
///             Shape::new(
///                 "Temperature",
///                 [
///                     AttributeDescriptor::of::<f64>("Celsius").read_only(),
///                     AttributeDescriptor::of::<f64>("Fahrenheit").read_only(),
///                 ],
///             )
///         })
///     }
///
///     fn read(&self, name: &str) -> Result<Value> {
///         match name {
///             "Celsius" => Ok(Value::from(self.celsius)),
///             "Fahrenheit" => Ok(Value::from(self.celsius * 1.8 + 32.0)),
///             _ => Err(Error::unknown_attribute("Temperature", name)),
///         }
///     }
/// }
///
/// let lines: Vec<_> = recast::to_csv([&Temperature { celsius: 100.0 }], true)
///     .collect::<recast::Result<_>>()
///     .unwrap();
/// assert_eq!(lines, vec!["Celsius,Fahrenheit", "100,212"]);
/// ```
pub trait Record {
    /// The type's shape. Must return equal shapes on every call.
    fn shape() -> &'static Shape
    where
        Self: Sized;

    /// Reads the attribute called `name`.
    ///
    /// # Errors
    ///
    /// Fails for names the shape does not declare and for accessors that fail.
    fn read(&self, name: &str) -> Result<Value>;
}

/// A record that can be constructed empty and written attribute by attribute.
pub trait RecordMut: Record {
    /// The zero-argument construction path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`](crate::Error::Construction) when the type cannot
    /// be built without arguments.
    fn construct() -> Result<Self>
    where
        Self: Sized;

    /// Writes `value` into the attribute called `name`.
    ///
    /// # Errors
    ///
    /// Fails for unknown names, read-only attributes and values of the wrong kind.
    fn write(&mut self, name: &str, value: Value) -> Result<()>;
}

/// Resolves the shape of `T`.
///
/// Pure and idempotent: every call returns the same attributes in the same order.
#[must_use]
pub fn describe<T: Record>() -> &'static Shape {
    T::shape()
}

/// Attribute name for a struct field, without the raw-identifier prefix.
///
/// ```rust
/// use recast::shape::field_name;
///
/// assert_eq!(field_name("r#type"), "type");
/// assert_eq!(field_name("kind"), "kind");
/// ```
#[must_use]
pub fn field_name(ident: &'static str) -> &'static str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// One item of a record sequence, which may be absent.
///
/// Implemented for `&T` and `Option<T>`, so encoders accept `&vec`, `vec.iter()` and an
/// owned `Vec<Option<T>>`. A borrowed `&[Option<T>]` can be passed as
/// `slice.iter().flatten()` when absent records may be dropped, or cloned otherwise.
pub trait Element {
    type Record: Record;

    fn record(&self) -> Option<&Self::Record>;
}

impl<'a, T: Record> Element for &'a T {
    type Record = T;

    fn record(&self) -> Option<&T> {
        Some(*self)
    }
}

impl<T: Record> Element for Option<T> {
    type Record = T;

    fn record(&self) -> Option<&T> {
        self.as_ref()
    }
}
