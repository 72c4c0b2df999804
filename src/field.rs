//! Conversion between Rust field types and [`Value`].
//!
//! [`ToValue`] is the read side and is all the JSON encoder needs from a sequence
//! element. [`Field`] adds the write side and a [`TypeTag`]; every attribute declared
//! through [`record!`](crate::record) must have a `Field` type.
//!
//! | Rust type | Tag | Value |
//! |---|---|---|
//! | `i8`..`i64`, `isize`, `u8`..`u32` | `Primitive` | `Number::Integer` |
//! | `u64`, `usize` | `Primitive` | `Number::Unsigned` |
//! | `f64` / `f32` | `Primitive` | `Number::Float` / `Number::Single` |
//! | `char` | `Primitive` | `String` |
//! | `BigInt` | `Primitive` | `BigInt` |
//! | `String` | `String` | `String` |
//! | `bool` | `Boolean` | `Bool` |
//! | `DateTime<Utc>`, `NaiveDate` | `Other` | `Timestamp`, `Date` |
//! | `Option<T>` | tag of `T` | `Null` or the value of `T` |

use crate::{Error, Number, Result, TypeTag, Value};
use chrono::{DateTime, NaiveDate, Utc};
use num_bigint::BigInt;
use std::any::type_name;

/// Produces the [`Value`] of an attribute or sequence element.
pub trait ToValue {
    /// # Errors
    ///
    /// Fails when a nested record's accessor fails.
    fn to_value(&self) -> Result<Value>;
}

/// A type that can be declared as a record attribute.
pub trait Field: ToValue + Sized + 'static {
    const TYPE_TAG: TypeTag;

    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] when `value` is of the wrong kind or out of range.
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch<T>(value: &Value) -> Error {
    Error::type_mismatch(type_name::<T>(), value.kind())
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Result<Value> {
        (**self).to_value()
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Result<Value> {
        Ok(self.clone())
    }
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {$(
        impl ToValue for $ty {
            fn to_value(&self) -> Result<Value> {
                Ok(Value::Number(Number::Integer(*self as i64)))
            }
        }

        impl Field for $ty {
            const TYPE_TAG: TypeTag = TypeTag::Primitive;

            fn from_value(value: Value) -> Result<Self> {
                match &value {
                    Value::Number(n) => n
                        .as_i64()
                        .and_then(|i| <$ty>::try_from(i).ok())
                        .ok_or_else(|| mismatch::<$ty>(&value)),
                    _ => Err(mismatch::<$ty>(&value)),
                }
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($ty:ty => $variant:ident),*) => {$(
        impl ToValue for $ty {
            fn to_value(&self) -> Result<Value> {
                Ok(Value::Number(Number::$variant(*self as _)))
            }
        }

        impl Field for $ty {
            const TYPE_TAG: TypeTag = TypeTag::Primitive;

            fn from_value(value: Value) -> Result<Self> {
                let converted = match &value {
                    Value::Number(Number::Integer(i)) => <$ty>::try_from(*i).ok(),
                    Value::Number(Number::Unsigned(u)) => <$ty>::try_from(*u).ok(),
                    _ => None,
                };
                converted.ok_or_else(|| mismatch::<$ty>(&value))
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8 => Integer, u16 => Integer, u32 => Integer, u64 => Unsigned, usize => Unsigned);

impl ToValue for f64 {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::Number(Number::Float(*self)))
    }
}

impl Field for f64 {
    const TYPE_TAG: TypeTag = TypeTag::Primitive;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Number(Number::Float(f)) => Ok(f),
            Value::Number(Number::Single(f)) => Ok(f64::from(f)),
            other => Err(mismatch::<f64>(&other)),
        }
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::Number(Number::Single(*self)))
    }
}

impl Field for f32 {
    const TYPE_TAG: TypeTag = TypeTag::Primitive;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Number(Number::Single(f)) => Ok(f),
            other => Err(mismatch::<f32>(&other)),
        }
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::Bool(*self))
    }
}

impl Field for bool {
    const TYPE_TAG: TypeTag = TypeTag::Boolean;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch::<bool>(&other)),
        }
    }
}

impl ToValue for char {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::String(self.to_string()))
    }
}

impl Field for char {
    const TYPE_TAG: TypeTag = TypeTag::Primitive;

    fn from_value(value: Value) -> Result<Self> {
        if let Value::String(s) = &value {
            let mut chars = s.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                return Ok(c);
            }
        }
        Err(mismatch::<char>(&value))
    }
}

impl ToValue for str {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::String(self.to_string()))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }
}

impl Field for String {
    const TYPE_TAG: TypeTag = TypeTag::String;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(mismatch::<String>(&other)),
        }
    }
}

impl ToValue for BigInt {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::BigInt(self.clone()))
    }
}

impl Field for BigInt {
    const TYPE_TAG: TypeTag = TypeTag::Primitive;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::BigInt(bi) => Ok(bi),
            Value::Number(Number::Integer(i)) => Ok(BigInt::from(i)),
            Value::Number(Number::Unsigned(u)) => Ok(BigInt::from(u)),
            other => Err(mismatch::<BigInt>(&other)),
        }
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::Timestamp(*self))
    }
}

impl Field for DateTime<Utc> {
    const TYPE_TAG: TypeTag = TypeTag::Other;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Timestamp(dt) => Ok(dt),
            other => Err(mismatch::<DateTime<Utc>>(&other)),
        }
    }
}

impl ToValue for NaiveDate {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::Date(*self))
    }
}

impl Field for NaiveDate {
    const TYPE_TAG: TypeTag = TypeTag::Other;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Date(d) => Ok(d),
            other => Err(mismatch::<NaiveDate>(&other)),
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Result<Value> {
        match self {
            Some(inner) => inner.to_value(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: Field> Field for Option<T> {
    const TYPE_TAG: TypeTag = T::TYPE_TAG;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
