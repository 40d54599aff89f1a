//! [`XmlSink`] implementation over `quick_xml::Writer`.
//!
//! Start tags are held back until the first piece of content, child element
//! or end tag, so attributes and namespace declarations can still be added
//! after `write_start_element`. An element that never receives content is
//! written as an empty element.

use std::io::Write;

use helios_contract::QualifiedName;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Result, WriteError};
use crate::sink::XmlSink;
use crate::xml::utils::{XSI_NAMESPACE, XSI_PREFIX};

/// Namespace scope of one open element.
#[derive(Debug)]
struct OpenElement {
    tag: String,
    default_namespace: String,
    prefixes: Vec<(String, String)>,
}

/// Streaming XML sink writing through quick-xml.
pub struct QuickXmlSink<W: Write> {
    writer: Writer<W>,
    pending: Option<BytesStart<'static>>,
    open: Vec<OpenElement>,
}

impl<W: Write> QuickXmlSink<W> {
    /// Creates a sink writing compact XML.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Writer::new(writer),
            pending: None,
            open: Vec::new(),
        }
    }

    /// Creates a sink indenting nested elements by `indent` spaces.
    pub fn new_with_indent(writer: W, indent: usize) -> Self {
        Self {
            writer: Writer::new_with_indent(writer, b' ', indent),
            pending: None,
            open: Vec::new(),
        }
    }

    /// Writes `<?xml version="1.0" encoding="utf-8"?>`. Must come first.
    pub fn write_declaration(&mut self) -> Result<()> {
        if self.pending.is_some() || !self.open.is_empty() {
            return Err(WriteError::Custom(
                "XML declaration must precede the root element".to_string(),
            ));
        }
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        Ok(())
    }

    /// Closes every open element and returns the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        while !self.open.is_empty() {
            self.write_end_element()?;
        }
        Ok(self.writer.into_inner())
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    fn flush_pending(&mut self) -> Result<()> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }

    fn pending_mut(&mut self, what: &str) -> Result<&mut BytesStart<'static>> {
        self.pending
            .as_mut()
            .ok_or_else(|| WriteError::Custom(format!("{what} written outside a start tag")))
    }

    fn inherited_default_namespace(&self) -> &str {
        self.open
            .last()
            .map(|element| element.default_namespace.as_str())
            .unwrap_or("")
    }

    /// Namespace bound to `prefix` in the current scope.
    fn resolve_prefix(&self, prefix: &str) -> Option<&str> {
        self.open.iter().rev().find_map(|element| {
            element
                .prefixes
                .iter()
                .rev()
                .find(|(p, _)| p == prefix)
                .map(|(_, ns)| ns.as_str())
        })
    }

    /// An in-scope prefix bound to `namespace`.
    fn lookup_prefix(&self, namespace: &str) -> Option<String> {
        self.open
            .iter()
            .rev()
            .flat_map(|element| element.prefixes.iter().rev())
            .find(|(prefix, ns)| {
                ns == namespace && self.resolve_prefix(prefix) == Some(ns.as_str())
            })
            .map(|(prefix, _)| prefix.clone())
    }

    fn declare_prefix(&mut self, prefix: &str, namespace: &str) -> Result<()> {
        let start = self.pending_mut("namespace declaration")?;
        start.push_attribute((format!("xmlns:{prefix}").as_str(), namespace));
        if let Some(element) = self.open.last_mut() {
            element
                .prefixes
                .push((prefix.to_string(), namespace.to_string()));
        }
        Ok(())
    }

    /// Returns a prefix for `namespace`, declaring a generated one on the
    /// open start tag when none is in scope.
    fn ensure_prefix(&mut self, namespace: &str) -> Result<String> {
        if let Some(prefix) = self.lookup_prefix(namespace) {
            return Ok(prefix);
        }
        let depth = self.open.len();
        let mut n = 1;
        let mut prefix = format!("d{depth}p{n}");
        while self.resolve_prefix(&prefix).is_some() {
            n += 1;
            prefix = format!("d{depth}p{n}");
        }
        self.declare_prefix(&prefix, namespace)?;
        Ok(prefix)
    }
}

impl<W: Write> XmlSink for QuickXmlSink<W> {
    fn write_start_element(
        &mut self,
        prefix: Option<&str>,
        local_name: &str,
        namespace: &str,
    ) -> Result<()> {
        self.flush_pending()?;
        let inherited = self.inherited_default_namespace().to_string();
        let (tag, default_namespace) = match prefix {
            Some(prefix) => (format!("{prefix}:{local_name}"), inherited.clone()),
            None => (local_name.to_string(), namespace.to_string()),
        };

        let mut start = BytesStart::new(tag.clone());
        let mut prefixes = Vec::new();
        match prefix {
            Some(prefix) => {
                if self.resolve_prefix(prefix) != Some(namespace) {
                    start.push_attribute((format!("xmlns:{prefix}").as_str(), namespace));
                    prefixes.push((prefix.to_string(), namespace.to_string()));
                }
            }
            None => {
                if namespace != inherited {
                    start.push_attribute(("xmlns", namespace));
                }
            }
        }

        self.pending = Some(start);
        self.open.push(OpenElement {
            tag,
            default_namespace,
            prefixes,
        });
        Ok(())
    }

    fn write_end_element(&mut self) -> Result<()> {
        let element = self
            .open
            .pop()
            .ok_or_else(|| WriteError::Custom("end element without an open element".to_string()))?;
        match self.pending.take() {
            Some(start) => self.writer.write_event(Event::Empty(start))?,
            None => self
                .writer
                .write_event(Event::End(BytesEnd::new(element.tag)))?,
        }
        Ok(())
    }

    fn write_namespace_decl(&mut self, namespace: &str) -> Result<()> {
        if self.inherited_default_namespace() == namespace {
            return Ok(());
        }
        self.ensure_prefix(namespace).map(|_| ())
    }

    fn write_prefix_decl(&mut self, prefix: &str, namespace: &str) -> Result<()> {
        if self.resolve_prefix(prefix) == Some(namespace) {
            return Ok(());
        }
        self.declare_prefix(prefix, namespace)
    }

    fn write_attribute(
        &mut self,
        prefix: Option<&str>,
        local_name: &str,
        namespace: &str,
        value: &str,
    ) -> Result<()> {
        let name = match prefix {
            Some(prefix) => {
                self.write_prefix_decl(prefix, namespace)?;
                format!("{prefix}:{local_name}")
            }
            None if namespace.is_empty() => local_name.to_string(),
            None => format!("{}:{local_name}", self.ensure_prefix(namespace)?),
        };
        self.pending_mut("attribute")?
            .push_attribute((name.as_str(), value));
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.flush_pending()?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    fn write_qualified_name(&mut self, name: &str, namespace: &str) -> Result<()> {
        if namespace.is_empty() {
            return self.write_text(name);
        }
        let prefix = self.ensure_prefix(namespace)?;
        self.write_text(&format!("{prefix}:{name}"))
    }

    fn write_xsi_type(&mut self, type_name: &QualifiedName) -> Result<()> {
        let value = if type_name.namespace.is_empty() {
            type_name.name.clone()
        } else {
            format!("{}:{}", self.ensure_prefix(&type_name.namespace)?, type_name.name)
        };
        self.write_attribute(Some(XSI_PREFIX), "type", XSI_NAMESPACE, &value)
    }

    fn write_xsi_nil(&mut self) -> Result<()> {
        self.write_attribute(Some(XSI_PREFIX), "nil", XSI_NAMESPACE, "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(sink: QuickXmlSink<Vec<u8>>) -> String {
        String::from_utf8(sink.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_empty_element_collapses() {
        let mut sink = QuickXmlSink::new(Vec::new());
        sink.write_start_element(None, "Person", "urn:p").unwrap();
        sink.write_end_element().unwrap();
        assert_eq!(output(sink), r#"<Person xmlns="urn:p"/>"#);
    }

    #[test]
    fn test_default_namespace_is_inherited() {
        let mut sink = QuickXmlSink::new(Vec::new());
        sink.write_start_element(None, "Person", "urn:p").unwrap();
        sink.write_start_element(None, "Name", "urn:p").unwrap();
        sink.write_text("a & b").unwrap();
        sink.write_end_element().unwrap();
        sink.write_start_element(None, "Other", "urn:o").unwrap();
        sink.write_end_element().unwrap();
        sink.write_end_element().unwrap();
        assert_eq!(
            output(sink),
            r#"<Person xmlns="urn:p"><Name>a &amp; b</Name><Other xmlns="urn:o"/></Person>"#
        );
    }

    #[test]
    fn test_xsi_attributes_use_declared_prefix() {
        let mut sink = QuickXmlSink::new(Vec::new());
        sink.write_start_element(None, "Root", "urn:r").unwrap();
        sink.write_prefix_decl(XSI_PREFIX, XSI_NAMESPACE).unwrap();
        sink.write_start_element(None, "Item", "urn:r").unwrap();
        sink.write_xsi_type(&QualifiedName::new("int", "http://www.w3.org/2001/XMLSchema"))
            .unwrap();
        sink.write_text("1").unwrap();
        sink.write_end_element().unwrap();
        sink.write_start_element(None, "Gone", "urn:r").unwrap();
        sink.write_xsi_nil().unwrap();
        sink.write_end_element().unwrap();
        assert_eq!(
            output(sink),
            concat!(
                r#"<Root xmlns="urn:r" xmlns:i="http://www.w3.org/2001/XMLSchema-instance">"#,
                r#"<Item xmlns:d2p1="http://www.w3.org/2001/XMLSchema" i:type="d2p1:int">1</Item>"#,
                r#"<Gone i:nil="true"/></Root>"#
            )
        );
    }

    #[test]
    fn test_qualified_name_content_declares_prefix() {
        let mut sink = QuickXmlSink::new(Vec::new());
        sink.write_start_element(Some("q"), "Code", "urn:c").unwrap();
        sink.write_qualified_name("Value", "urn:v").unwrap();
        sink.write_end_element().unwrap();
        assert_eq!(
            output(sink),
            r#"<q:Code xmlns:q="urn:c" xmlns:d1p1="urn:v">d1p1:Value</q:Code>"#
        );
    }

    #[test]
    fn test_attribute_after_content_is_rejected() {
        let mut sink = QuickXmlSink::new(Vec::new());
        sink.write_start_element(None, "A", "").unwrap();
        sink.write_text("x").unwrap();
        assert!(matches!(sink.write_xsi_nil(), Err(WriteError::Custom(_))));
    }

    #[test]
    fn test_finish_closes_open_elements() {
        let mut sink = QuickXmlSink::new(Vec::new());
        sink.write_declaration().unwrap();
        sink.write_start_element(None, "A", "").unwrap();
        sink.write_start_element(None, "B", "").unwrap();
        sink.write_text("1").unwrap();
        assert_eq!(
            output(sink),
            r#"<?xml version="1.0" encoding="utf-8"?><A><B>1</B></A>"#
        );
    }
}
