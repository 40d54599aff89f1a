//! Substitutes wire shapes for the well-known adapter types.

use chrono::Utc;
use helios_contract::class::{DATE_TIME_FIELD, KEY_FIELD, OFFSET_MINUTES_FIELD, VALUE_FIELD};
use helios_contract::{ClassContract, ContractError, DataType, ObjectValue, Value};

use crate::error::{Result, WriteError};

/// Replaces a timestamp with offset or a key/value pair by a fresh adapter
/// object. Every other value passes through unchanged.
pub(crate) fn resolve_adapter(value: Value, contract: &ClassContract) -> Result<Value> {
    match value {
        Value::DateTimeOffset(timestamp) => {
            let offset_minutes = i16::try_from(timestamp.offset().local_minus_utc() / 60)
                .map_err(|e| WriteError::Custom(format!("offset out of range: {e}")))?;
            let adapter = ObjectValue::new(DataType::DateTimeOffset)
                .with_field(DATE_TIME_FIELD, Value::DateTime(timestamp.with_timezone(&Utc)))
                .with_field(OFFSET_MINUTES_FIELD, Value::I16(offset_minutes));
            Ok(Value::Object(adapter))
        }
        Value::KeyValue(pair) => {
            if !matches!(contract.data_type(), DataType::KeyValuePair(..)) {
                return Err(ContractError::AdapterUnavailable {
                    contract: contract.stable_name().to_string(),
                    type_name: pair.data_type.to_string(),
                }
                .into());
            }
            let adapter = ObjectValue::new(contract.data_type().clone())
                .with_field(KEY_FIELD, pair.key.clone())
                .with_field(VALUE_FIELD, pair.value.clone());
            Ok(Value::Object(adapter))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use helios_contract::{KeyValue, PrimitiveType};
    use std::sync::Arc;

    #[test]
    fn test_date_time_offset_adapter() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let timestamp = offset.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let adapted =
            resolve_adapter(Value::DateTimeOffset(timestamp), &ClassContract::date_time_offset())
                .unwrap();
        let object = adapted.as_object().unwrap();
        assert_eq!(object.data_type(), &DataType::DateTimeOffset);
        assert_eq!(
            object.field(DATE_TIME_FIELD),
            Some(&Value::DateTime(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()))
        );
        assert_eq!(object.field(OFFSET_MINUTES_FIELD), Some(&Value::I16(120)));
    }

    #[test]
    fn test_key_value_pair_adapter() {
        let key = DataType::Primitive(PrimitiveType::String);
        let value = DataType::Primitive(PrimitiveType::Int32);
        let contract = ClassContract::key_value_pair(key.clone(), value.clone());
        let pair = Value::KeyValue(Arc::new(KeyValue::new(
            DataType::key_value_pair(key, value),
            Value::from("a"),
            Value::I32(1),
        )));
        let adapted = resolve_adapter(pair.clone(), &contract).unwrap();
        let object = adapted.as_object().unwrap();
        assert_eq!(object.field(KEY_FIELD), Some(&Value::from("a")));
        assert_eq!(object.field(VALUE_FIELD), Some(&Value::I32(1)));

        let plain = ClassContract::date_time_offset();
        assert!(matches!(
            resolve_adapter(pair, &plain),
            Err(WriteError::Contract(ContractError::AdapterUnavailable { .. }))
        ));
    }

    #[test]
    fn test_other_values_pass_through() {
        let contract = ClassContract::date_time_offset();
        assert_eq!(resolve_adapter(Value::I32(4), &contract).unwrap(), Value::I32(4));
    }
}
