//! Top-level entry points: root element handling and output buffers.

use std::io::Write;
use std::sync::Arc;

use helios_contract::types::SERIALIZATION_NAMESPACE;
use helios_contract::{ContractSet, DataType, QualifiedName, Value};
use tracing::debug;

use crate::config::WriterSettings;
use crate::context::{WriteContext, XmlWriteContext, array_contract};
use crate::error::{Result, WriteError};
use crate::sink::XmlSink;
use crate::xml::QuickXmlSink;
use crate::xml::utils::{XSI_NAMESPACE, XSI_PREFIX};

/// Serialize `value`, declared as `root_type`, to an XML string.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use helios_contract::{ClassContract, ContractSet, DataMember, DataType, ObjectValue, PrimitiveType, QualifiedName, Value};
/// use helios_contract_xml::to_xml_string;
///
/// let person = DataType::Class("Person".into());
/// let contract = ClassContract::builder(person.clone(), QualifiedName::new("Person", "urn:people"))
///     .member(DataMember::new("Name", DataType::Primitive(PrimitiveType::String)))
///     .build()?;
/// let contracts = ContractSet::new().with_class(Arc::new(contract));
///
/// let value = Value::Object(ObjectValue::new(person.clone()).with_field("Name", "Ada"));
/// let xml = to_xml_string(&contracts, &value, &person)?;
/// assert_eq!(
///     xml,
///     r#"<Person xmlns="urn:people" xmlns:i="http://www.w3.org/2001/XMLSchema-instance"><Name>Ada</Name></Person>"#
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn to_xml_string(
    contracts: &ContractSet,
    value: &Value,
    root_type: &DataType,
) -> Result<String> {
    let buffer = to_xml_vec(contracts, value, root_type)?;
    Ok(String::from_utf8(buffer)?)
}

/// Serialize `value`, declared as `root_type`, to an XML byte vector.
pub fn to_xml_vec(contracts: &ContractSet, value: &Value, root_type: &DataType) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_xml_writer(contracts, value, root_type, &mut buffer)?;
    Ok(buffer)
}

/// Serialize `value`, declared as `root_type`, to an XML writer.
pub fn to_xml_writer<W>(
    contracts: &ContractSet,
    value: &Value,
    root_type: &DataType,
    writer: W,
) -> Result<()>
where
    W: Write,
{
    write_document(contracts, &WriterSettings::default(), value, root_type, writer)
}

/// Serializer bound to a shared contract set and settings.
///
/// Each call runs with its own sink and context, so one serializer can be
/// used from several threads at once.
#[derive(Debug, Clone)]
pub struct XmlContractSerializer {
    contracts: Arc<ContractSet>,
    settings: WriterSettings,
}

impl XmlContractSerializer {
    pub fn new(contracts: Arc<ContractSet>) -> Self {
        Self::with_settings(contracts, WriterSettings::default())
    }

    pub fn with_settings(contracts: Arc<ContractSet>, settings: WriterSettings) -> Self {
        Self {
            contracts,
            settings,
        }
    }

    pub fn contracts(&self) -> &ContractSet {
        &self.contracts
    }

    pub fn settings(&self) -> &WriterSettings {
        &self.settings
    }

    /// Writes the root element of `value` into a caller-supplied sink.
    pub fn write_object<S>(&self, sink: &mut S, value: &Value, root_type: &DataType) -> Result<()>
    where
        S: XmlSink + ?Sized,
    {
        write_root(&self.contracts, &self.settings, sink, value, root_type)
    }

    pub fn to_string(&self, value: &Value, root_type: &DataType) -> Result<String> {
        let buffer = self.to_vec(value, root_type)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn to_vec(&self, value: &Value, root_type: &DataType) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.to_writer(value, root_type, &mut buffer)?;
        Ok(buffer)
    }

    pub fn to_writer<W>(&self, value: &Value, root_type: &DataType, writer: W) -> Result<()>
    where
        W: Write,
    {
        write_document(&self.contracts, &self.settings, value, root_type, writer)
    }
}

fn write_document<W>(
    contracts: &ContractSet,
    settings: &WriterSettings,
    value: &Value,
    root_type: &DataType,
    writer: W,
) -> Result<()>
where
    W: Write,
{
    let mut sink = match settings.indent {
        Some(indent) => QuickXmlSink::new_with_indent(writer, indent),
        None => QuickXmlSink::new(writer),
    };
    if settings.write_declaration {
        sink.write_declaration()?;
    }
    write_root(contracts, settings, &mut sink, value, root_type)?;
    let mut writer = sink.finish()?;
    writer.flush()?;
    Ok(())
}

fn write_root<S>(
    contracts: &ContractSet,
    settings: &WriterSettings,
    sink: &mut S,
    value: &Value,
    root_type: &DataType,
) -> Result<()>
where
    S: XmlSink + ?Sized,
{
    let declared = if root_type.is_nullable() {
        root_type.nullable_argument()?
    } else {
        root_type
    };
    let root_name = root_name(contracts, declared)?;
    debug!(root = %root_name, "writing root element");

    let mut context = XmlWriteContext::new(contracts, settings);
    sink.write_start_element(None, &root_name.name, &root_name.namespace)?;
    sink.write_prefix_decl(XSI_PREFIX, XSI_NAMESPACE)?;
    if value.is_null() {
        let is_serializable = context.is_type_serializable(declared);
        context.write_null(sink, declared, is_serializable)?;
    } else {
        let is_declared_type = value.runtime_type() == *declared;
        context.internal_serialize_reference(sink, value, is_declared_type, false, declared)?;
    }
    sink.write_end_element()
}

/// Element name of a root declared as `data_type`.
fn root_name(contracts: &ContractSet, data_type: &DataType) -> Result<QualifiedName> {
    if let Some(contract) = contracts.get(data_type) {
        return Ok(contract.stable_name().clone());
    }
    match data_type {
        DataType::Primitive(primitive) => Ok(QualifiedName::new(
            primitive.xsd_name(),
            SERIALIZATION_NAMESPACE,
        )),
        DataType::Object | DataType::ValueType => {
            Ok(QualifiedName::new("anyType", SERIALIZATION_NAMESPACE))
        }
        DataType::Array(item) => Ok(array_contract(contracts, item).stable_name().clone()),
        other => Err(WriteError::UnknownType {
            type_name: other.to_string(),
        }),
    }
}
