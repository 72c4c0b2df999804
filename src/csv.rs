//! CSV encoding.
//!
//! [`CsvEncoder`] turns a sequence of records into a lazy sequence of lines. Each call
//! to [`Iterator::next`] pulls at most one record from the input; nothing is buffered,
//! so the output can be restarted exactly when the input can.
//!
//! - The optional header joins the readable attribute names with the delimiter.
//! - Each record becomes one line of formatted values in the same order.
//! - An absent record becomes a line of empty fields.
//! - An accessor failure is yielded once as [`Error::Encode`] and ends the sequence.
//!
//! ## Examples
//!
//! ```rust
//! use recast::{record, to_csv};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Score {
//!         pub name: String,
//!         pub points: u32,
//!     }
//! }
//!
//! let scores = vec![
//!     Score { name: "Alice".into(), points: 30 },
//!     Score { name: "Bob, Jr.".into(), points: 25 },
//! ];
//! let lines = to_csv(&scores, true).collect::<recast::Result<Vec<_>>>().unwrap();
//! assert_eq!(lines, vec!["name,points", "Alice,30", "\"Bob, Jr.\",25"]);
//! ```

use crate::format::csv_field;
use crate::{CsvOptions, Delimiter, Element, Error, Format, Record, Result};

/// Renders record sequences as CSV lines.
#[derive(Debug, Clone, Default)]
pub struct CsvEncoder {
    options: CsvOptions,
}

impl CsvEncoder {
    #[must_use]
    pub fn new(options: CsvOptions) -> Self {
        CsvEncoder { options }
    }

    #[must_use]
    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// Lazily encodes `items`.
    pub fn lines<I>(&self, items: I) -> CsvLines<I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Element,
    {
        let shape = <<I::Item as Element>::Record as Record>::shape();
        tracing::debug!(
            shape = shape.type_name(),
            format = %Format::Csv,
            header = self.options.include_header,
            "encoding records"
        );
        CsvLines {
            items: items.into_iter(),
            delimiter: self.options.delimiter,
            header_pending: self.options.include_header,
            done: false,
        }
    }

    /// Lazily encodes `items`, rejecting an absent sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `items` is `None`.
    pub fn encode<I>(&self, items: Option<I>) -> Result<CsvLines<I::IntoIter>>
    where
        I: IntoIterator,
        I::Item: Element,
    {
        items
            .map(|items| self.lines(items))
            .ok_or_else(|| Error::invalid_argument("items", "sequence cannot be absent"))
    }
}

/// Lazy CSV output; see [`CsvEncoder::lines`].
pub struct CsvLines<I> {
    items: I,
    delimiter: Delimiter,
    header_pending: bool,
    done: bool,
}

impl<I> CsvLines<I>
where
    I: Iterator,
    I::Item: Element,
{
    fn header(&self) -> String {
        <<I::Item as Element>::Record as Record>::shape()
            .readable()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .join(self.delimiter.as_str())
    }

    fn row(&self, item: &I::Item) -> Result<String> {
        let shape = <<I::Item as Element>::Record as Record>::shape();
        let mut cells = Vec::with_capacity(shape.len());
        match item.record() {
            Some(record) => {
                for attribute in shape.readable() {
                    cells.push(csv_field(&record.read(attribute.name())?, self.delimiter));
                }
            }
            None => cells.resize(shape.readable().count(), String::new()),
        }
        Ok(cells.join(self.delimiter.as_str()))
    }
}

impl<I> Iterator for CsvLines<I>
where
    I: Iterator,
    I::Item: Element,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.header_pending {
            self.header_pending = false;
            return Some(Ok(self.header()));
        }
        let Some(item) = self.items.next() else {
            self.done = true;
            return None;
        };
        match self.row(&item) {
            Ok(line) => Some(Ok(line)),
            Err(err) => {
                self.done = true;
                Some(Err(err.encoding(Format::Csv)))
            }
        }
    }
}
