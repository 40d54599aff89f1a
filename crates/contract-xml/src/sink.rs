//! The XML token sink consumed by the writer.
//!
//! A sink is owned by exactly one in-flight write. Start tags stay open for
//! attributes and namespace declarations until content, a child element or
//! the end tag is written.

use chrono::{DateTime, Utc};
use helios_contract::QualifiedName;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::xml::utils;

pub trait XmlSink {
    /// Opens an element. With a prefix, the prefix is bound to `namespace`
    /// if it is not already.
    fn write_start_element(
        &mut self,
        prefix: Option<&str>,
        local_name: &str,
        namespace: &str,
    ) -> Result<()>;

    fn write_end_element(&mut self) -> Result<()>;

    /// Makes `namespace` available on the open element under some prefix.
    fn write_namespace_decl(&mut self, namespace: &str) -> Result<()>;

    /// Binds `prefix` to `namespace` on the open element.
    fn write_prefix_decl(&mut self, prefix: &str, namespace: &str) -> Result<()>;

    fn write_attribute(
        &mut self,
        prefix: Option<&str>,
        local_name: &str,
        namespace: &str,
        value: &str,
    ) -> Result<()>;

    /// Escaped text content.
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// A qualified name as text content, declaring a prefix when needed.
    fn write_qualified_name(&mut self, name: &str, namespace: &str) -> Result<()>;

    /// `xsi:type` on the open element.
    fn write_xsi_type(&mut self, type_name: &QualifiedName) -> Result<()>;

    /// `xsi:nil="true"` on the open element.
    fn write_xsi_nil(&mut self) -> Result<()>;

    fn write_bool_array(&mut self, items: &[bool], item_name: &str, namespace: &str) -> Result<()> {
        write_items(self, items, item_name, namespace, |v| {
            utils::bool_to_string(*v).to_string()
        })
    }

    fn write_date_time_array(
        &mut self,
        items: &[DateTime<Utc>],
        item_name: &str,
        namespace: &str,
    ) -> Result<()> {
        write_items(self, items, item_name, namespace, utils::date_time_to_string)
    }

    fn write_decimal_array(
        &mut self,
        items: &[Decimal],
        item_name: &str,
        namespace: &str,
    ) -> Result<()> {
        write_items(self, items, item_name, namespace, Decimal::to_string)
    }

    fn write_i32_array(&mut self, items: &[i32], item_name: &str, namespace: &str) -> Result<()> {
        write_items(self, items, item_name, namespace, i32::to_string)
    }

    fn write_i64_array(&mut self, items: &[i64], item_name: &str, namespace: &str) -> Result<()> {
        write_items(self, items, item_name, namespace, i64::to_string)
    }

    fn write_f32_array(&mut self, items: &[f32], item_name: &str, namespace: &str) -> Result<()> {
        write_items(self, items, item_name, namespace, |v| utils::f32_to_string(*v))
    }

    fn write_f64_array(&mut self, items: &[f64], item_name: &str, namespace: &str) -> Result<()> {
        write_items(self, items, item_name, namespace, |v| utils::f64_to_string(*v))
    }
}

fn write_items<S, T, F>(
    sink: &mut S,
    items: &[T],
    item_name: &str,
    namespace: &str,
    format: F,
) -> Result<()>
where
    S: XmlSink + ?Sized,
    F: Fn(&T) -> String,
{
    for item in items {
        sink.write_start_element(None, item_name, namespace)?;
        sink.write_text(&format(item))?;
        sink.write_end_element()?;
    }
    Ok(())
}
