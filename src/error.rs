//! Error types for record mapping and encoding.
//!
//! ## Error Categories
//!
//! - **Invalid arguments**: an absent source record or sequence, or an element name
//!   that cannot appear in XML output
//! - **Construction failures**: the destination type has no usable zero-argument
//!   construction path
//! - **Attribute failures**: unknown attribute names, accessors that fail, values whose
//!   type does not fit the attribute
//! - **Encoding failures**: an attribute failure raised while rendering CSV or JSON,
//!   wrapped with the format that was being produced
//!
//! ## Examples
//!
//! ```rust
//! use recast::Error;
//!
//! let err = Error::invalid_argument("source", "source record cannot be absent");
//! assert!(err.to_string().contains("source"));
//! ```

use crate::format::Format;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while describing, mapping or encoding records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A required argument was absent or malformed
    #[error("Invalid argument `{name}`: {msg}")]
    InvalidArgument { name: String, msg: String },

    /// The destination type could not be constructed
    #[error("Cannot construct `{type_name}`: {msg}")]
    Construction { type_name: String, msg: String },

    /// The record type declares no attribute with this name
    #[error("`{type_name}` has no attribute named `{name}`")]
    UnknownAttribute { type_name: String, name: String },

    /// An attribute accessor or mutator failed
    #[error("Cannot access attribute `{name}`: {msg}")]
    AttributeAccess { name: String, msg: String },

    /// A value did not fit the attribute it was written to
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// An attribute failure surfaced while producing the given format
    #[error("{format} encoding failed: {source}")]
    Encode {
        format: Format,
        #[source]
        source: Box<Error>,
    },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid-argument error naming the offending parameter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recast::Error;
    ///
    /// let err = Error::invalid_argument("items", "sequence cannot be absent");
    /// assert!(err.to_string().contains("items"));
    /// ```
    pub fn invalid_argument(name: &str, msg: &str) -> Self {
        Error::InvalidArgument {
            name: name.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a construction error for a destination type.
    pub fn construction(type_name: &str, msg: &str) -> Self {
        Error::Construction {
            type_name: type_name.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an error for a name the record's shape does not declare.
    pub fn unknown_attribute(type_name: &str, name: &str) -> Self {
        Error::UnknownAttribute {
            type_name: type_name.to_string(),
            name: name.to_string(),
        }
    }

    /// Creates an error for an accessor or mutator that failed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recast::Error;
    ///
    /// let err = Error::attribute_access("Balance", "ledger is locked");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Cannot access attribute `Balance`: ledger is locked"
    /// );
    /// ```
    pub fn attribute_access<T: fmt::Display>(name: &str, msg: T) -> Self {
        Error::AttributeAccess {
            name: name.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a type mismatch error when a value cannot be stored in an attribute.
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Wraps `self` with the format whose encoding it interrupted.
    pub fn encoding(self, format: Format) -> Self {
        Error::Encode {
            format,
            source: Box::new(self),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
