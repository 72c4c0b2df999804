//! Dynamic value representation for attribute contents.
//!
//! Every attribute read from a [`Record`](crate::Record) is surfaced as a [`Value`], and
//! every attribute written by the mapper is fed one. The encoders never look at the
//! concrete Rust field type; they only see the `Value`.
//!
//! ## Core Types
//!
//! - [`Value`]: null, bool, number, string, timestamp, date, bigint or a captured record
//! - [`Number`]: signed, unsigned, double and single precision numbers
//! - [`RecordValue`]: a nested record captured through its shape, one level deep
//!
//! ## Text Conversion
//!
//! `Display` is the *default text conversion* used by CSV cells, XML element content and
//! the mapper's stringify tiers:
//!
//! ```rust
//! use recast::{Number, Value};
//!
//! assert_eq!(Value::Null.to_string(), "");
//! assert_eq!(Value::Bool(true).to_string(), "true");
//! assert_eq!(Value::Number(Number::Float(10.5)).to_string(), "10.5");
//! assert_eq!(Value::from("Alice").to_string(), "Alice");
//! ```

use crate::{Error, Record, RecordMut, Result, ValueMap};
use chrono::{DateTime, NaiveDate, Utc};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use std::fmt;

/// A dynamically-typed attribute value.
///
/// # Examples
///
/// ```rust
/// use recast::{Number, Value};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    BigInt(BigInt),
    Record(RecordValue),
}

/// A numeric attribute value.
///
/// Single precision floats keep their own variant so that their shortest
/// round-trip text is the `f32` one (`0.1`, not `0.10000000149011612`).
///
/// # Examples
///
/// ```rust
/// use recast::Number;
///
/// assert!(Number::Integer(42).is_integer());
/// assert_eq!(Number::Single(0.1).to_string(), "0.1");
/// assert!(!Number::Float(f64::NAN).is_finite());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Single(f32),
}

impl Number {
    /// Returns `true` for the integer variants.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_) | Number::Unsigned(_))
    }

    /// Returns `true` for the floating-point variants.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_) | Number::Single(_))
    }

    /// Returns `false` for NaN and the infinities.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Float(f) => f.is_finite(),
            Number::Single(f) => f.is_finite(),
            _ => true,
        }
    }

    /// Converts this number to an `i64` if it is an integer in range.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Unsigned(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// Converts this number to an `f64`, possibly losing precision.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Unsigned(u) => *u as f64,
            Number::Float(f) => *f,
            Number::Single(f) => f64::from(*f),
        }
    }
}

impl fmt::Display for Number {
    // Rust's float formatting is shortest round-trip and never exponential.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Unsigned(u) => write!(f, "{}", u),
            Number::Float(n) => write!(f, "{}", n),
            Number::Single(n) => write!(f, "{}", n),
        }
    }
}

/// A nested record captured attribute by attribute through its shape.
///
/// Only one level is captured eagerly: a nested record's own record-typed
/// attributes are captured when that nested record is read, not ahead of time.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordValue {
    type_name: &'static str,
    fields: ValueMap,
}

impl RecordValue {
    pub fn new(type_name: &'static str, fields: ValueMap) -> Self {
        RecordValue { type_name, fields }
    }

    /// Reads every readable attribute of `record`, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first accessor failure.
    pub fn capture<R: Record>(record: &R) -> Result<Self> {
        let shape = R::shape();
        let mut fields = ValueMap::with_capacity(shape.len());
        for attribute in shape.readable() {
            fields.insert(attribute.name().to_string(), record.read(attribute.name())?);
        }
        Ok(RecordValue {
            type_name: shape.type_name(),
            fields,
        })
    }

    /// Builds a fresh `R` and writes every captured, writable attribute back into it.
    ///
    /// # Errors
    ///
    /// Fails when the value was captured from a different type, or when `R` cannot be
    /// constructed or written.
    pub fn rebuild<R: RecordMut>(self) -> Result<R> {
        let shape = R::shape();
        if self.type_name != shape.type_name() {
            return Err(Error::type_mismatch(shape.type_name(), self.type_name));
        }
        let mut record = R::construct()?;
        for (name, value) in self.fields {
            if shape.get(&name).map_or(false, |a| a.can_write()) {
                record.write(&name, value)?;
            }
        }
        Ok(record)
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn fields(&self) -> &ValueMap {
        &self.fields
    }

    #[must_use]
    pub fn into_fields(self) -> ValueMap {
        self.fields
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Short name of the variant, used in type mismatch messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(Number::Integer(_)) => "integer",
            Value::Number(Number::Unsigned(_)) => "unsigned integer",
            Value::Number(Number::Float(_)) => "double",
            Value::Number(Number::Single(_)) => "single",
            Value::String(_) => "string",
            Value::Timestamp(_) => "timestamp",
            Value::Date(_) => "date",
            Value::BigInt(_) => "bigint",
            Value::Record(_) => "record",
        }
    }

    /// Default text conversion, or `None` for an absent value.
    ///
    /// This is what the mapper's stringify tiers assign.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recast::Value;
    ///
    /// assert_eq!(Value::from(5).to_text(), Some("5".to_string()));
    /// assert_eq!(Value::Null.to_text(), None);
    /// ```
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Timestamp(dt) => f.write_str(&dt.to_rfc3339()),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::BigInt(bi) => write!(f, "{}", bi),
            // Nested records are not introspected by text conversion.
            Value::Record(r) => f.write_str(r.type_name),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Unsigned(u)) => serializer.serialize_u64(*u),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::Number(Number::Single(f)) => serializer.serialize_f32(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Timestamp(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Value::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            Value::BigInt(bi) => {
                if let Ok(i) = i64::try_from(bi) {
                    serializer.serialize_i64(i)
                } else if let Ok(u) = u64::try_from(bi) {
                    serializer.serialize_u64(u)
                } else {
                    serializer.collect_str(bi)
                }
            }
            Value::Record(r) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(r.fields.len()))?;
                for (k, v) in r.fields.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(i64::from(value)))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(Number::Unsigned(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<RecordValue> for Value {
    fn from(value: RecordValue) -> Self {
        Value::Record(value)
    }
}
