//! # recast
//!
//! Copies values between differently shaped records and renders record sequences as
//! CSV, JSON or XML, driven by per-type attribute descriptions instead of runtime
//! reflection.
//!
//! ## Key Features
//!
//! - **Record shapes**: the [`record!`] macro describes a struct's public attributes
//!   (name, type, readability) once and caches the description for the process
//! - **Tiered mapping**: [`map_to`] matches attributes by exact name and type, then
//!   case-insensitive name, then falls back to text conversion for string destinations
//! - **Three encoders**: lazy CSV lines, a compact JSON array, and pretty-printed XML
//! - **Shared formatting**: one place decides literals and escaping for every format
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use recast::{map_to, record, to_csv, to_json, to_xml};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Employee {
//!         pub name: String,
//!         pub age: u32,
//!         pub salary: f64,
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     #[allow(non_snake_case)]
//!     pub struct Badge {
//!         pub Name: String,
//!         pub age: Option<String>,
//!     }
//! }
//!
//! let staff = vec![Employee { name: "Dana".into(), age: 41, salary: 5200.5 }];
//!
//! let lines: Vec<String> = to_csv(&staff, true).collect::<recast::Result<_>>().unwrap();
//! assert_eq!(lines, ["name,age,salary", "Dana,41,5200.5"]);
//!
//! assert_eq!(to_json(&staff).unwrap(), r#"[{"name":"Dana","age":41,"salary":5200.5}]"#);
//! assert!(to_xml(&staff).unwrap().contains("<age>41</age>"));
//!
//! let badge: Badge = map_to(&staff[0]).unwrap();
//! assert_eq!(badge.Name, "Dana");
//! assert_eq!(badge.age.as_deref(), Some("41"));
//! ```
//!
//! ## Hand-written records
//!
//! Types that cannot go through the macro implement [`Record`] (and [`RecordMut`] to be
//! a mapping destination) directly; see the [`shape`] module.
//!
//! ## Error policy
//!
//! - [`map_to`] fails when the destination cannot be constructed or written, or when a
//!   source attribute read fails. Read failures are returned unchanged.
//! - CSV and JSON propagate the first attribute read failure as [`Error::Encode`].
//! - XML writes `Error accessing attribute: ...` into the element and keeps going.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`mapping.rs`** - mapping between DTO-style records, with the resolution trace
//! - **`reports.rs`** - one record set rendered as CSV, JSON and XML
//!
//! Run either with: `cargo run --example <name>`

pub mod csv;
pub mod error;
pub mod field;
pub mod format;
pub mod json;
pub mod macros;
pub mod map;
pub mod mapper;
pub mod options;
pub mod shape;
pub mod value;
pub mod xml;

pub use csv::{CsvEncoder, CsvLines};
pub use error::{Error, Result};
pub use field::{Field, ToValue};
pub use format::{format_value, Format};
pub use json::JsonEncoder;
pub use map::ValueMap;
pub use mapper::{
    CaseInsensitiveTextTier, CaseInsensitiveTier, ExactTier, Mapper, Mapping, Resolution,
    SameNameTextTier, Tier,
};
pub use options::{CsvOptions, Delimiter, XmlOptions};
pub use shape::{describe, AttributeDescriptor, Element, Record, RecordMut, Shape, TypeTag};
pub use value::{Number, RecordValue, Value};
pub use xml::XmlEncoder;

/// Builds a `D` from `source` with the default four-tier [`Mapper`].
///
/// Attributes that no tier can resolve keep the destination's default value.
///
/// # Examples
///
/// ```rust
/// use recast::{map_to, record};
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Point { pub x: i32, pub y: i32 }
/// }
///
/// let copy: Point = map_to(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(copy, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Construction`] when `D` cannot be constructed, or the error of a
/// failing read or write.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn map_to<S, D>(source: &S) -> Result<D>
where
    S: Record,
    D: RecordMut,
{
    Mapper::default().map(Some(source))
}

/// Lazily encodes `items` as comma-delimited lines, optionally preceded by a header.
///
/// # Examples
///
/// ```rust
/// use recast::{record, to_csv};
///
/// record! {
///     #[derive(Debug, Default)]
///     #[allow(non_snake_case)]
///     pub struct Entry { pub Description: String, pub Value: i32 }
/// }
///
/// let entries = [Entry { Description: "Hello, World!".into(), Value: 100 }];
/// let lines: Vec<_> = to_csv(&entries, false).collect::<recast::Result<_>>().unwrap();
/// assert_eq!(lines, ["\"Hello, World!\",100"]);
/// ```
pub fn to_csv<I>(items: I, include_header: bool) -> CsvLines<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Element,
{
    CsvEncoder::new(CsvOptions::new().with_header(include_header)).lines(items)
}

/// Encodes `items` as a single JSON array.
///
/// # Errors
///
/// Returns [`Error::Encode`] wrapping the first attribute read failure.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_json<I>(items: I) -> Result<String>
where
    I: IntoIterator,
    I::Item: ToValue,
{
    JsonEncoder::new().to_string(items)
}

/// Encodes `items` under a `<root>` element, one child per record named after its type.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when the record type name is not a valid element
/// name.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_xml<I>(items: I) -> Result<String>
where
    I: IntoIterator,
    I::Item: Element,
{
    to_xml_with_options(items, XmlOptions::default())
}

/// Encodes `items` as XML with custom element names and layout.
///
/// # Examples
///
/// ```rust
/// use recast::{record, to_xml_with_options, XmlOptions};
///
/// record! {
///     #[derive(Debug, Default)]
///     pub struct Tag { pub label: String }
/// }
///
/// let tags = [Tag { label: "new".into() }];
/// let options = XmlOptions::compact().with_root_name("tags").with_item_name("tag");
/// let xml = to_xml_with_options(&tags, options).unwrap();
/// assert_eq!(xml, "<tags><tag><label>new</label></tag></tags>");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when the root or item name is not a valid element
/// name.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_xml_with_options<I>(items: I, options: XmlOptions) -> Result<String>
where
    I: IntoIterator,
    I::Item: Element,
{
    XmlEncoder::new(options).to_string(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct User {
            pub id: u32,
            pub name: String,
            pub active: bool,
        }
    }

    record! {
        #[derive(Debug, Default, PartialEq)]
        #[allow(non_snake_case)]
        struct UserSummary {
            pub ID: Option<String>,
            pub name: String,
            pub active: String,
        }
    }

    fn users() -> Vec<User> {
        vec![
            User { id: 1, name: "Alice".into(), active: true },
            User { id: 2, name: "Bob".into(), active: false },
        ]
    }

    #[test]
    fn test_map_to_identity() {
        let user = users().remove(0);
        let copy: User = map_to(&user).unwrap();
        assert_eq!(copy, user);
    }

    #[test]
    fn test_map_to_text_fallback() {
        let summary: UserSummary = map_to(&users()[1]).unwrap();
        assert_eq!(
            summary,
            UserSummary {
                ID: Some("2".into()),
                name: "Bob".into(),
                active: "false".into(),
            }
        );
    }

    #[test]
    fn test_csv_with_and_without_header() {
        let with: Vec<_> = to_csv(&users(), true).collect::<Result<_>>().unwrap();
        assert_eq!(with, ["id,name,active", "1,Alice,true", "2,Bob,false"]);

        let without: Vec<_> = to_csv(&users(), false).collect::<Result<_>>().unwrap();
        assert_eq!(without, ["1,Alice,true", "2,Bob,false"]);
    }

    #[test]
    fn test_csv_empty_sequence_yields_header_only() {
        let lines: Vec<_> = to_csv(Vec::<&User>::new(), true)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(lines, ["id,name,active"]);
    }

    #[test]
    fn test_json_array() {
        assert_eq!(
            to_json(&users()).unwrap(),
            r#"[{"id":1,"name":"Alice","active":true},{"id":2,"name":"Bob","active":false}]"#
        );
    }

    #[test]
    fn test_xml_document() {
        let xml = to_xml(&users()[..1]).unwrap();
        assert_eq!(
            xml,
            "<root>\n  <User>\n    <id>1</id>\n    <name>Alice</name>\n    <active>true</active>\n  </User>\n</root>"
        );
    }
}
