//! Registry of primitive contracts: types written directly as text content.

use helios_contract::{DataType, PrimitiveType, QualifiedName, Value, types::XSD_NAMESPACE};

use crate::context::WriteContext;
use crate::error::{Result, WriteError};
use crate::sink::XmlSink;
use crate::writer::element;
use crate::xml::utils;

/// Text serialization for one primitive type, or for the untyped object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveContract {
    primitive: Option<PrimitiveType>,
}

static OBJECT: PrimitiveContract = PrimitiveContract { primitive: None };

static PRIMITIVES: [PrimitiveContract; PrimitiveType::ALL.len()] = {
    let mut table = [PrimitiveContract { primitive: None }; PrimitiveType::ALL.len()];
    let mut i = 0;
    while i < table.len() {
        table[i] = PrimitiveContract {
            primitive: Some(PrimitiveType::ALL[i]),
        };
        i += 1;
    }
    table
};

impl PrimitiveContract {
    /// Looks up the contract of `data_type`. `None` means the type is not
    /// primitive and needs a class or collection contract.
    pub fn for_type(data_type: &DataType) -> Option<&'static PrimitiveContract> {
        match data_type {
            DataType::Primitive(primitive) => Some(&PRIMITIVES[*primitive as usize]),
            DataType::Object => Some(&OBJECT),
            _ => None,
        }
    }

    /// Whether this is the contract of the untyped top type. The writer
    /// never takes a primitive shortcut through it.
    pub fn is_object(&self) -> bool {
        self.primitive.is_none()
    }

    pub fn primitive(&self) -> Option<PrimitiveType> {
        self.primitive
    }

    pub fn underlying_type(&self) -> DataType {
        match self.primitive {
            Some(primitive) => DataType::Primitive(primitive),
            None => DataType::Object,
        }
    }

    pub fn stable_name(&self) -> QualifiedName {
        match self.primitive {
            Some(primitive) => primitive.stable_name(),
            None => QualifiedName::new("anyType", XSD_NAMESPACE),
        }
    }

    /// Writes `value` as the text content of the open element.
    ///
    /// The untyped object has no content.
    pub fn write_value<S>(&self, sink: &mut S, value: &Value) -> Result<()>
    where
        S: XmlSink + ?Sized,
    {
        let Some(primitive) = self.primitive else {
            return Ok(());
        };
        let text = match (primitive, value) {
            (PrimitiveType::QualifiedName, Value::QName(name)) => {
                return sink.write_qualified_name(&name.name, &name.namespace);
            }
            (PrimitiveType::Boolean, Value::Bool(v)) => utils::bool_to_string(*v).to_string(),
            (PrimitiveType::Char, Value::Char(v)) => utils::char_to_string(*v),
            (PrimitiveType::SByte, Value::I8(v)) => v.to_string(),
            (PrimitiveType::Byte, Value::U8(v)) => v.to_string(),
            (PrimitiveType::Int16, Value::I16(v)) => v.to_string(),
            (PrimitiveType::UInt16, Value::U16(v)) => v.to_string(),
            (PrimitiveType::Int32, Value::I32(v)) => v.to_string(),
            (PrimitiveType::UInt32, Value::U32(v)) => v.to_string(),
            (PrimitiveType::Int64, Value::I64(v)) => v.to_string(),
            (PrimitiveType::UInt64, Value::U64(v)) => v.to_string(),
            (PrimitiveType::Single, Value::F32(v)) => utils::f32_to_string(*v),
            (PrimitiveType::Double, Value::F64(v)) => utils::f64_to_string(*v),
            (PrimitiveType::Decimal, Value::Decimal(v)) => v.to_string(),
            (PrimitiveType::DateTime, Value::DateTime(v)) => utils::date_time_to_string(v),
            (PrimitiveType::TimeSpan, Value::TimeSpan(v)) => utils::duration_to_string(*v),
            (PrimitiveType::Guid, Value::Guid(v)) => v.hyphenated().to_string(),
            (PrimitiveType::String, Value::String(v)) => v.clone(),
            (PrimitiveType::ByteArray, Value::Bytes(v)) => utils::bytes_to_string(v),
            (PrimitiveType::Uri, Value::Uri(v)) => v.clone(),
            (expected, found) => {
                return Err(WriteError::TypeMismatch {
                    expected: expected.xsd_name().to_string(),
                    found: found.kind_name(),
                });
            }
        };
        sink.write_text(&text)
    }

    /// Writes a whole `<name>value</name>` element. A null reference-like
    /// value becomes a nil element.
    pub fn write_element<S, C>(
        &self,
        sink: &mut S,
        context: &mut C,
        value: &Value,
        name: &str,
        namespace: &str,
    ) -> Result<()>
    where
        S: XmlSink + ?Sized,
        C: WriteContext,
    {
        let data_type = self.underlying_type();
        element::write_start_element(sink, &data_type, namespace, name)?;
        if value.is_null() && !data_type.is_value_type() {
            context.write_null(sink, &data_type, true)?;
        } else {
            self.write_value(sink, value)?;
        }
        element::write_end_element(sink)
    }
}
