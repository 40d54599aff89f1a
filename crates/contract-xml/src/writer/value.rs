//! The value dispatcher: decides between a null marker, direct primitive
//! content and a nested polymorphic write.

use helios_contract::{DataType, Value};
use tracing::trace;

use crate::context::WriteContext;
use crate::error::{Result, WriteError};
use crate::primitive::PrimitiveContract;
use crate::sink::XmlSink;

/// How one value is written.
#[derive(Debug, Clone, PartialEq)]
pub enum ValuePlan {
    /// Null marker for the effective type.
    Null { data_type: DataType },
    /// Text content through a primitive contract.
    Primitive(&'static PrimitiveContract),
    /// Through the context, by the contract of the runtime type.
    Nested {
        data_type: DataType,
        is_declared_type: bool,
    },
}

/// Decides how `value`, declared as `declared`, is written.
pub fn plan_value(declared: &DataType, value: &Value, write_xsi_type: bool) -> Result<ValuePlan> {
    if declared.is_value_type() && !declared.is_nullable() {
        if value.is_null() {
            return Err(WriteError::TypeMismatch {
                expected: declared.to_string(),
                found: value.kind_name(),
            });
        }
        if let Some(primitive) = PrimitiveContract::for_type(declared).filter(|_| !write_xsi_type) {
            return Ok(ValuePlan::Primitive(primitive));
        }
        return Ok(ValuePlan::Nested {
            data_type: declared.clone(),
            is_declared_type: value.runtime_type() == *declared,
        });
    }

    let effective = if declared.is_nullable() {
        let argument = declared.nullable_argument()?;
        if value.is_null() {
            argument.clone()
        } else {
            value.runtime_type()
        }
    } else {
        declared.clone()
    };

    if value.is_null() {
        return Ok(ValuePlan::Null {
            data_type: effective,
        });
    }

    let primitive = PrimitiveContract::for_type(&effective)
        .filter(|primitive| !primitive.is_object() && !write_xsi_type);
    if let Some(primitive) = primitive {
        return Ok(ValuePlan::Primitive(primitive));
    }

    let is_declared_type = value.runtime_type() == effective;
    Ok(ValuePlan::Nested {
        data_type: effective,
        is_declared_type,
    })
}

/// Writes `value` as the content of the open element.
pub fn write_value<S, C>(
    sink: &mut S,
    context: &mut C,
    declared: &DataType,
    value: &Value,
    write_xsi_type: bool,
) -> Result<()>
where
    S: XmlSink + ?Sized,
    C: WriteContext,
{
    let plan = plan_value(declared, value, write_xsi_type)?;
    trace!(declared = %declared, ?plan, "dispatching value");
    match plan {
        ValuePlan::Null { data_type } => {
            let is_serializable = context.is_type_serializable(&data_type);
            context.write_null(sink, &data_type, is_serializable)
        }
        ValuePlan::Primitive(primitive) => primitive.write_value(sink, value),
        ValuePlan::Nested {
            data_type,
            is_declared_type,
        } => context.internal_serialize_reference(
            sink,
            value,
            is_declared_type,
            write_xsi_type,
            &data_type,
        ),
    }
}
