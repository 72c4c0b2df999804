//! JSON encoding.
//!
//! Renders a sequence as one array literal. Records become object literals whose keys
//! follow attribute declaration order; strings, numbers and booleans become the matching
//! literals; absent elements become `null` in place. No whitespace is emitted.
//!
//! ## Examples
//!
//! ```rust
//! use recast::{record, to_json};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     #[allow(non_snake_case)]
//!     pub struct Person {
//!         pub Name: Option<String>,
//!         pub Age: i32,
//!     }
//! }
//!
//! let people = vec![Some(Person { Name: Some("Alice".into()), Age: 29 }), None];
//! assert_eq!(to_json(&people).unwrap(), r#"[{"Name":"Alice","Age":29},null]"#);
//! assert_eq!(to_json(Vec::<i32>::new()).unwrap(), "[]");
//! assert_eq!(to_json([true, false]).unwrap(), "[true,false]");
//! ```

use crate::format::write_json;
use crate::{Error, Format, Result, ToValue};

/// Renders sequences as a JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl JsonEncoder {
    #[must_use]
    pub fn new() -> Self {
        JsonEncoder
    }

    /// Encodes `items` as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] wrapping the first accessor failure.
    pub fn to_string<I>(&self, items: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: ToValue,
    {
        tracing::debug!(format = %Format::Json, "encoding records");
        let mut output = String::with_capacity(256);
        output.push('[');
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                output.push(',');
            }
            let value = item.to_value().map_err(|e| e.encoding(Format::Json))?;
            write_json(&mut output, &value);
        }
        output.push(']');
        Ok(output)
    }

    /// Encodes `items`, rejecting an absent sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `items` is `None`, otherwise see
    /// [`JsonEncoder::to_string`].
    pub fn encode<I>(&self, items: Option<I>) -> Result<String>
    where
        I: IntoIterator,
        I::Item: ToValue,
    {
        let items =
            items.ok_or_else(|| Error::invalid_argument("items", "sequence cannot be absent"))?;
        self.to_string(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    record! {
        #[derive(Debug, Default)]
        struct Blank {}
    }

    #[test]
    fn test_strings_escaped() {
        let strings = ["He said, \"What's that?\"", "Back\\slash"];
        assert_eq!(
            JsonEncoder::new().to_string(strings).unwrap(),
            r#"["He said, \"What's that?\"","Back\\slash"]"#
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(JsonEncoder::new().to_string([1, 2, 3]).unwrap(), "[1,2,3]");
        assert_eq!(
            JsonEncoder::new().to_string([0.5f64, 1e-7]).unwrap(),
            "[0.5,0.0000001]"
        );
    }

    #[test]
    fn test_record_without_attributes() {
        assert_eq!(JsonEncoder::new().to_string([Blank {}]).unwrap(), "[{}]");
    }

    #[test]
    fn test_absent_sequence_rejected() {
        let result = JsonEncoder::new().encode(None::<Vec<i32>>);
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    }
}
