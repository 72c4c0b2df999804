//! Configuration options for the encoders.
//!
//! - [`CsvOptions`]: header row and field delimiter
//! - [`XmlOptions`]: root and item element names, indentation
//!
//! ## Examples
//!
//! ```rust
//! use recast::{CsvOptions, Delimiter, XmlOptions};
//!
//! let csv = CsvOptions::new().with_delimiter(Delimiter::Semicolon).without_header();
//! assert!(!csv.include_header);
//!
//! let xml = XmlOptions::new().with_root_name("people").with_item_name("person");
//! assert_eq!(xml.root_name, "people");
//! ```

/// Field delimiter for CSV output.
///
/// # Examples
///
/// ```rust
/// use recast::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
            Delimiter::Semicolon => ";",
        }
    }
}

/// Options for [`CsvEncoder`](crate::csv::CsvEncoder).
///
/// Defaults to a header row and comma delimiter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvOptions {
    pub include_header: bool,
    pub delimiter: Delimiter,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            include_header: true,
            delimiter: Delimiter::default(),
        }
    }
}

impl CsvOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    /// Suppresses the header row.
    #[must_use]
    pub fn without_header(self) -> Self {
        self.with_header(false)
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Options for [`XmlEncoder`](crate::xml::XmlEncoder).
///
/// # Examples
///
/// ```rust
/// use recast::XmlOptions;
///
/// let options = XmlOptions::new();
/// assert_eq!(options.root_name, "root");
/// assert_eq!(options.item_name, None);
/// assert!(options.pretty);
/// assert_eq!(options.indent, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlOptions {
    pub root_name: String,
    /// Element name for each record; the record's type name when `None`.
    pub item_name: Option<String>,
    pub pretty: bool,
    pub indent: usize,
}

impl Default for XmlOptions {
    fn default() -> Self {
        XmlOptions {
            root_name: "root".to_string(),
            item_name: None,
            pretty: true,
            indent: 2,
        }
    }
}

impl XmlOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for single-line output with no indentation.
    #[must_use]
    pub fn compact() -> Self {
        XmlOptions {
            pretty: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    #[must_use]
    pub fn with_item_name(mut self, name: impl Into<String>) -> Self {
        self.item_name = Some(name.into());
        self
    }

    /// Sets the number of spaces per nesting level. Only affects pretty output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
