//! Writes arrays, lists and dictionaries.

use helios_contract::{
    ArrayValue, CollectionContract, CollectionKind, ContractError, DataType, PrimitiveType, Value,
};
use tracing::debug;

use crate::context::WriteContext;
use crate::error::Result;
use crate::primitive::PrimitiveContract;
use crate::sink::XmlSink;
use crate::writer::{element, value, write_class};

/// Writes the items of a collection-contract-described value.
pub fn write_collection<S, C>(
    sink: &mut S,
    value: &Value,
    context: &mut C,
    contract: &CollectionContract,
) -> Result<()>
where
    S: XmlSink + ?Sized,
    C: WriteContext,
{
    debug!(contract = %contract.stable_name(), kind = ?contract.kind(), "writing collection");
    let namespace = contract.namespace();
    let item_name = contract.item_name();

    if contract.kind() == CollectionKind::Array {
        let Value::Array(array) = value else {
            return Err(ContractError::UnexpectedValue {
                expected: contract.data_type().to_string(),
                found: value.kind_name(),
            }
            .into());
        };
        context.increment_array_count(sink, array.len())?;
        let item_type = contract.item_type();
        if !try_write_primitive_array(sink, array, item_type, item_name, namespace)? {
            for item in array.iter() {
                element::write_start_element(sink, item_type, namespace, item_name)?;
                value::write_value(sink, context, item_type, &item, false)?;
                element::write_end_element(sink)?;
            }
        }
        return Ok(());
    }

    let count = contract.collection_count(value)?;
    context.increment_collection_count(sink, count)?;

    let enumerated_type = contract.enumerated_type();
    let primitive =
        PrimitiveContract::for_type(enumerated_type).filter(|primitive| !primitive.is_object());
    let item_contract = if contract.kind().is_dictionary() {
        let item_contract = contract.item_contract().ok_or_else(|| {
            ContractError::MissingItemContract {
                contract: contract.stable_name().to_string(),
            }
        })?;
        Some(item_contract)
    } else {
        None
    };

    for item in contract.enumerate(value)? {
        context.increment_item_count(1)?;
        if let Some(primitive) = primitive {
            primitive.write_element(sink, context, &item, item_name, namespace)?;
            continue;
        }
        element::write_start_element(sink, enumerated_type, namespace, item_name)?;
        match item_contract {
            Some(entry) => write_class(sink, &item, context, entry)?,
            None => value::write_value(sink, context, enumerated_type, &item, false)?,
        }
        element::write_end_element(sink)?;
    }
    Ok(())
}

/// Writes a whole array in one batched sink call when its item type has a
/// bulk writer. Returns false when the per-item path must be used.
fn try_write_primitive_array<S>(
    sink: &mut S,
    array: &ArrayValue,
    item_type: &DataType,
    item_name: &str,
    namespace: &str,
) -> Result<bool>
where
    S: XmlSink + ?Sized,
{
    let DataType::Primitive(primitive) = item_type else {
        return Ok(false);
    };
    match (primitive, array) {
        (PrimitiveType::Boolean, ArrayValue::Bool(items)) => {
            sink.write_bool_array(items, item_name, namespace)?
        }
        (PrimitiveType::DateTime, ArrayValue::DateTime(items)) => {
            sink.write_date_time_array(items, item_name, namespace)?
        }
        (PrimitiveType::Decimal, ArrayValue::Decimal(items)) => {
            sink.write_decimal_array(items, item_name, namespace)?
        }
        (PrimitiveType::Int32, ArrayValue::I32(items)) => {
            sink.write_i32_array(items, item_name, namespace)?
        }
        (PrimitiveType::Int64, ArrayValue::I64(items)) => {
            sink.write_i64_array(items, item_name, namespace)?
        }
        (PrimitiveType::Single, ArrayValue::F32(items)) => {
            sink.write_f32_array(items, item_name, namespace)?
        }
        (PrimitiveType::Double, ArrayValue::F64(items)) => {
            sink.write_f64_array(items, item_name, namespace)?
        }
        _ => return Ok(false),
    }
    debug!(item_type = %item_type, len = array.len(), "wrote primitive array in bulk");
    Ok(true)
}
