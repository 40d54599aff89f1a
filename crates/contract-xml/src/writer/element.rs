//! Start and end tags of member and item elements.

use helios_contract::{DataType, PrimitiveType};

use crate::error::Result;
use crate::sink::XmlSink;
use crate::xml::utils::ELEMENT_PREFIX;

/// Only qualified-name elements in a namespace carry an explicit prefix.
pub(crate) fn needs_prefix(data_type: &DataType, namespace: &str) -> bool {
    matches!(data_type, DataType::Primitive(PrimitiveType::QualifiedName)) && !namespace.is_empty()
}

pub(crate) fn write_start_element<S>(
    sink: &mut S,
    data_type: &DataType,
    namespace: &str,
    local_name: &str,
) -> Result<()>
where
    S: XmlSink + ?Sized,
{
    let prefix = needs_prefix(data_type, namespace).then_some(ELEMENT_PREFIX);
    sink.write_start_element(prefix, local_name, namespace)
}

pub(crate) fn write_end_element<S>(sink: &mut S) -> Result<()>
where
    S: XmlSink + ?Sized,
{
    sink.write_end_element()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_prefix() {
        let qname = DataType::Primitive(PrimitiveType::QualifiedName);
        assert!(needs_prefix(&qname, "urn:a"));
        assert!(!needs_prefix(&qname, ""));
        assert!(!needs_prefix(&DataType::Primitive(PrimitiveType::String), "urn:a"));
    }
}
