//! XML encoding.
//!
//! Renders a sequence as a root element holding one child element per record. Each
//! readable attribute becomes a child element named after the attribute. Text content
//! escapes `&`, `<` and `>` and replaces characters XML cannot carry; an absent
//! attribute value leaves its element empty. Every element name is checked before
//! anything is written, so the output is always well-formed.
//!
//! Unlike the CSV and JSON encoders, a failing attribute read does not abort the
//! encode: the element's content becomes `Error accessing attribute: <message>` and
//! encoding continues with the remaining attributes and records.
//!
//! ## Examples
//!
//! ```rust
//! use recast::{record, to_xml, to_xml_with_options, XmlOptions};
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
//! let people = vec![Person { Name: Some("Ann & Bo".into()), Age: 3 }];
//! assert_eq!(
//!     to_xml(&people).unwrap(),
//!     "<root>\n  <Person>\n    <Name>Ann &amp; Bo</Name>\n    <Age>3</Age>\n  </Person>\n</root>"
//! );
//!
//! let options = XmlOptions::compact().with_root_name("people").with_item_name("p");
//! assert_eq!(
//!     to_xml_with_options(&people, options).unwrap(),
//!     "<people><p><Name>Ann &amp; Bo</Name><Age>3</Age></p></people>"
//! );
//! assert_eq!(to_xml(Vec::<&Person>::new()).unwrap(), "<root />");
//! ```

use crate::format::{escape_xml, is_xml_name, xml_text};
use crate::{Element, Error, Format, Record, Result, XmlOptions};

/// Renders record sequences as an XML document fragment.
#[derive(Debug, Clone, Default)]
pub struct XmlEncoder {
    options: XmlOptions,
}

impl XmlEncoder {
    #[must_use]
    pub fn new(options: XmlOptions) -> Self {
        XmlEncoder { options }
    }

    #[must_use]
    pub fn options(&self) -> &XmlOptions {
        &self.options
    }

    /// Encodes `items` under the configured root element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the root name, the item name or a readable
    /// attribute name is not a valid element name. Attribute read failures are written
    /// into the output instead.
    pub fn to_string<I>(&self, items: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Element,
    {
        let shape = <<I::Item as Element>::Record as Record>::shape();
        let root = self.options.root_name.as_str();
        let item = self.options.item_name.as_deref().unwrap_or(shape.type_name());
        if !is_xml_name(root) {
            return Err(Error::invalid_argument(
                "root_name",
                &format!("`{root}` is not a valid element name"),
            ));
        }
        if !is_xml_name(item) {
            return Err(Error::invalid_argument(
                "item_name",
                &format!("`{item}` is not a valid element name"),
            ));
        }
        if let Some(bad) = shape.readable().find(|a| !is_xml_name(a.name())) {
            return Err(Error::invalid_argument(
                "shape",
                &format!(
                    "attribute `{}` of `{}` is not a valid element name",
                    bad.name(),
                    shape.type_name()
                ),
            ));
        }
        tracing::debug!(shape = shape.type_name(), format = %Format::Xml, "encoding records");

        let mut writer = Writer::new(&self.options);
        let mut items = items.into_iter().peekable();
        if items.peek().is_none() {
            writer.empty(root);
            return Ok(writer.finish());
        }

        writer.open(root);
        for element in items {
            let Some(record) = element.record() else {
                writer.leaf(item, "");
                continue;
            };
            if shape.readable().next().is_none() {
                writer.empty(item);
                continue;
            }
            writer.open(item);
            for attribute in shape.readable() {
                let name = attribute.name();
                match record.read(name) {
                    Ok(value) => writer.leaf(name, &xml_text(&value)),
                    Err(err) => {
                        tracing::warn!(
                            shape = shape.type_name(),
                            attribute = name,
                            error = %err,
                            "attribute read failed; writing diagnostic text"
                        );
                        let text = format!("Error accessing attribute: {err}");
                        writer.leaf(name, &escape_xml(&text));
                    }
                }
            }
            writer.close(item);
        }
        writer.close(root);
        Ok(writer.finish())
    }

    /// Encodes `items`, rejecting an absent sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `items` is `None`, otherwise see
    /// [`XmlEncoder::to_string`].
    pub fn encode<I>(&self, items: Option<I>) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Element,
    {
        let items =
            items.ok_or_else(|| Error::invalid_argument("items", "sequence cannot be absent"))?;
        self.to_string(items)
    }
}

/// Tracks nesting depth and line breaks while tags are appended.
struct Writer<'a> {
    output: String,
    options: &'a XmlOptions,
    depth: usize,
}

impl<'a> Writer<'a> {
    fn new(options: &'a XmlOptions) -> Self {
        Writer {
            output: String::with_capacity(256),
            options,
            depth: 0,
        }
    }

    fn line_start(&mut self) {
        if !self.options.pretty {
            return;
        }
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        let width = self.depth * self.options.indent;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    fn open(&mut self, name: &str) {
        self.line_start();
        self.output.push('<');
        self.output.push_str(name);
        self.output.push('>');
        self.depth += 1;
    }

    fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line_start();
        self.output.push_str("</");
        self.output.push_str(name);
        self.output.push('>');
    }

    fn empty(&mut self, name: &str) {
        self.line_start();
        self.output.push('<');
        self.output.push_str(name);
        self.output.push_str(" />");
    }

    /// `text` must already be escaped.
    fn leaf(&mut self, name: &str, text: &str) {
        self.line_start();
        self.output.push('<');
        self.output.push_str(name);
        self.output.push('>');
        self.output.push_str(text);
        self.output.push_str("</");
        self.output.push_str(name);
        self.output.push('>');
    }

    fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record, AttributeDescriptor, Shape, Value};
    use std::sync::OnceLock;

    record! {
        #[derive(Debug, Default)]
        struct Item {
            pub sku: String,
            pub qty: u32,
        }
    }

    record! {
        #[derive(Debug, Default)]
        struct Marker {}
    }

    /// Reads of `broken` always fail.
    #[derive(Debug, Default)]
    struct Flaky {
        ok: i32,
    }

    impl Record for Flaky {
        fn shape() -> &'static Shape {
            static SHAPE: OnceLock<Shape> = OnceLock::new();
            SHAPE.get_or_init(|| {
                Shape::new(
                    "Flaky",
                    [
                        AttributeDescriptor::of::<i32>("ok"),
                        AttributeDescriptor::of::<String>("broken"),
                    ],
                )
            })
        }

        fn read(&self, name: &str) -> Result<Value> {
            match name {
                "ok" => Ok(Value::from(self.ok)),
                "broken" => Err(Error::attribute_access(name, "sensor <offline>")),
                _ => Err(Error::unknown_attribute("Flaky", name)),
            }
        }
    }

    #[test]
    fn test_empty_sequence_self_closes_root() {
        let xml = XmlEncoder::default().to_string(Vec::<&Item>::new()).unwrap();
        assert_eq!(xml, "<root />");
    }

    #[test]
    fn test_absent_record_and_attribute() {
        let items = vec![None, Some(Item { sku: String::new(), qty: 1 })];
        let xml = XmlEncoder::new(XmlOptions::compact()).to_string(items).unwrap();
        assert_eq!(
            xml,
            "<root><Item></Item><Item><sku></sku><qty>1</qty></Item></root>"
        );
    }

    #[test]
    fn test_record_without_attributes() {
        let xml = XmlEncoder::default().to_string(&[Marker {}]).unwrap();
        assert_eq!(xml, "<root>\n  <Marker />\n</root>");
    }

    #[test]
    fn test_custom_indent() {
        let encoder = XmlEncoder::new(XmlOptions::new().with_indent(4));
        let xml = encoder.to_string(&[Item { sku: "a".into(), qty: 2 }]).unwrap();
        assert_eq!(
            xml,
            "<root>\n    <Item>\n        <sku>a</sku>\n        <qty>2</qty>\n    </Item>\n</root>"
        );
    }

    #[test]
    fn test_access_failure_is_contained() {
        let xml = XmlEncoder::new(XmlOptions::compact())
            .to_string(&[Flaky { ok: 7 }, Flaky { ok: 8 }])
            .unwrap();
        assert!(xml.starts_with("<root><Flaky><ok>7</ok><broken>Error accessing attribute: "));
        assert!(xml.contains("sensor &lt;offline&gt;</broken>"));
        assert!(xml.contains("<ok>8</ok>"));
        assert!(xml.ends_with("</Flaky></root>"));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let encoder = XmlEncoder::new(XmlOptions::new().with_root_name("not valid"));
        assert!(matches!(
            encoder.to_string(&[Item::default()]),
            Err(Error::InvalidArgument { .. })
        ));

        let encoder = XmlEncoder::new(XmlOptions::new().with_item_name("<item>"));
        assert!(matches!(
            encoder.to_string(&[Item::default()]),
            Err(Error::InvalidArgument { .. })
        ));
    }

    /// Hand-written shape whose attribute is not a valid element name.
    struct Spaced;

    impl Record for Spaced {
        fn shape() -> &'static Shape {
            static SHAPE: OnceLock<Shape> = OnceLock::new();
            SHAPE.get_or_init(|| {
                Shape::new("Spaced", [AttributeDescriptor::of::<i32>("Unit Price")])
            })
        }

        fn read(&self, _name: &str) -> Result<Value> {
            Ok(Value::from(1))
        }
    }

    #[test]
    fn test_invalid_attribute_name_rejected() {
        let err = XmlEncoder::default().to_string(&[Spaced]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { ref name, .. } if name == "shape"));
        assert!(err.to_string().contains("Unit Price"));

        // Checked up front, even when no record would be written.
        assert!(XmlEncoder::default().to_string(Vec::<&Spaced>::new()).is_err());
    }

    #[test]
    fn test_absent_sequence_rejected() {
        let result = XmlEncoder::default().encode(None::<Vec<&Item>>);
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    }
}
