//! In-memory values written through contracts.
//!
//! Compound payloads sit behind `Arc`, so cloning a [`Value`] never deep-copies
//! an object graph. Mutation goes through copy-on-write helpers and therefore
//! never reaches other holders of the same payload.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::types::{DataType, PrimitiveType, QualifiedName};

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    DateTime(DateTime<Utc>),
    TimeSpan(TimeDelta),
    Guid(Uuid),
    String(String),
    Bytes(Vec<u8>),
    Uri(String),
    QName(QualifiedName),
    DateTimeOffset(DateTime<FixedOffset>),
    KeyValue(Arc<KeyValue>),
    Object(ObjectValue),
    Array(ArrayValue),
    Collection(CollectionValue),
    Map(MapValue),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Runtime type identity of the value. `Null` reports the top type.
    pub fn runtime_type(&self) -> DataType {
        let primitive = |p| DataType::Primitive(p);
        match self {
            Value::Null => DataType::Object,
            Value::Bool(_) => primitive(PrimitiveType::Boolean),
            Value::Char(_) => primitive(PrimitiveType::Char),
            Value::I8(_) => primitive(PrimitiveType::SByte),
            Value::U8(_) => primitive(PrimitiveType::Byte),
            Value::I16(_) => primitive(PrimitiveType::Int16),
            Value::U16(_) => primitive(PrimitiveType::UInt16),
            Value::I32(_) => primitive(PrimitiveType::Int32),
            Value::U32(_) => primitive(PrimitiveType::UInt32),
            Value::I64(_) => primitive(PrimitiveType::Int64),
            Value::U64(_) => primitive(PrimitiveType::UInt64),
            Value::F32(_) => primitive(PrimitiveType::Single),
            Value::F64(_) => primitive(PrimitiveType::Double),
            Value::Decimal(_) => primitive(PrimitiveType::Decimal),
            Value::DateTime(_) => primitive(PrimitiveType::DateTime),
            Value::TimeSpan(_) => primitive(PrimitiveType::TimeSpan),
            Value::Guid(_) => primitive(PrimitiveType::Guid),
            Value::String(_) => primitive(PrimitiveType::String),
            Value::Bytes(_) => primitive(PrimitiveType::ByteArray),
            Value::Uri(_) => primitive(PrimitiveType::Uri),
            Value::QName(_) => primitive(PrimitiveType::QualifiedName),
            Value::DateTimeOffset(_) => DataType::DateTimeOffset,
            Value::KeyValue(pair) => pair.data_type.clone(),
            Value::Object(object) => object.data_type.clone(),
            Value::Array(array) => DataType::array(array.item_type()),
            Value::Collection(collection) => collection.data_type.clone(),
            Value::Map(map) => map.data_type.clone(),
        }
    }

    /// Short description of the value's shape, used in error messages.
    pub fn kind_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            other => format!("{} value", other.runtime_type()),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectValue> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<ObjectValue> for Value {
    fn from(v: ObjectValue) -> Self {
        Value::Object(v)
    }
}

impl From<ArrayValue> for Value {
    fn from(v: ArrayValue) -> Self {
        Value::Array(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A key/value pair with its declared pair type.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub data_type: DataType,
    pub key: Value,
    pub value: Value,
}

impl KeyValue {
    pub fn new(data_type: DataType, key: Value, value: Value) -> Self {
        Self {
            data_type,
            key,
            value,
        }
    }
}

/// An instance of a class or struct: its runtime type plus stored fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
    data_type: DataType,
    fields: Arc<BTreeMap<String, Value>>,
}

impl ObjectValue {
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            fields: Arc::new(BTreeMap::new()),
        }
    }

    /// Builder-style field assignment.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_field(key, value);
        self
    }

    /// Stores a field, copying the field table first if it is shared.
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        Arc::make_mut(&mut self.fields).insert(key.into(), value.into());
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A single-dimension array.
///
/// The dense variants carry the element kinds that have a bulk writer; any
/// other element type uses [`ArrayValue::Values`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValue {
    Bool(Arc<[bool]>),
    DateTime(Arc<[DateTime<Utc>]>),
    Decimal(Arc<[Decimal]>),
    I32(Arc<[i32]>),
    I64(Arc<[i64]>),
    F32(Arc<[f32]>),
    F64(Arc<[f64]>),
    Values {
        item_type: DataType,
        items: Arc<[Value]>,
    },
}

impl ArrayValue {
    /// Generic array of `item_type`.
    pub fn values(item_type: DataType, items: Vec<Value>) -> Self {
        ArrayValue::Values {
            item_type,
            items: items.into(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayValue::Bool(items) => items.len(),
            ArrayValue::DateTime(items) => items.len(),
            ArrayValue::Decimal(items) => items.len(),
            ArrayValue::I32(items) => items.len(),
            ArrayValue::I64(items) => items.len(),
            ArrayValue::F32(items) => items.len(),
            ArrayValue::F64(items) => items.len(),
            ArrayValue::Values { items, .. } => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type of the array.
    pub fn item_type(&self) -> DataType {
        match self {
            ArrayValue::Bool(_) => DataType::Primitive(PrimitiveType::Boolean),
            ArrayValue::DateTime(_) => DataType::Primitive(PrimitiveType::DateTime),
            ArrayValue::Decimal(_) => DataType::Primitive(PrimitiveType::Decimal),
            ArrayValue::I32(_) => DataType::Primitive(PrimitiveType::Int32),
            ArrayValue::I64(_) => DataType::Primitive(PrimitiveType::Int64),
            ArrayValue::F32(_) => DataType::Primitive(PrimitiveType::Single),
            ArrayValue::F64(_) => DataType::Primitive(PrimitiveType::Double),
            ArrayValue::Values { item_type, .. } => item_type.clone(),
        }
    }

    /// Element at `index` as a standalone value.
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            ArrayValue::Bool(items) => items.get(index).copied().map(Value::Bool),
            ArrayValue::DateTime(items) => items.get(index).copied().map(Value::DateTime),
            ArrayValue::Decimal(items) => items.get(index).copied().map(Value::Decimal),
            ArrayValue::I32(items) => items.get(index).copied().map(Value::I32),
            ArrayValue::I64(items) => items.get(index).copied().map(Value::I64),
            ArrayValue::F32(items) => items.get(index).copied().map(Value::F32),
            ArrayValue::F64(items) => items.get(index).copied().map(Value::F64),
            ArrayValue::Values { items, .. } => items.get(index).cloned(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

impl From<Vec<i32>> for ArrayValue {
    fn from(items: Vec<i32>) -> Self {
        ArrayValue::I32(items.into())
    }
}

impl From<Vec<i64>> for ArrayValue {
    fn from(items: Vec<i64>) -> Self {
        ArrayValue::I64(items.into())
    }
}

impl From<Vec<bool>> for ArrayValue {
    fn from(items: Vec<bool>) -> Self {
        ArrayValue::Bool(items.into())
    }
}

impl From<Vec<f32>> for ArrayValue {
    fn from(items: Vec<f32>) -> Self {
        ArrayValue::F32(items.into())
    }
}

impl From<Vec<f64>> for ArrayValue {
    fn from(items: Vec<f64>) -> Self {
        ArrayValue::F64(items.into())
    }
}

impl From<Vec<Decimal>> for ArrayValue {
    fn from(items: Vec<Decimal>) -> Self {
        ArrayValue::Decimal(items.into())
    }
}

impl From<Vec<DateTime<Utc>>> for ArrayValue {
    fn from(items: Vec<DateTime<Utc>>) -> Self {
        ArrayValue::DateTime(items.into())
    }
}

/// A list-like collection other than an array.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionValue {
    data_type: DataType,
    items: Arc<[Value]>,
}

impl CollectionValue {
    pub fn new(data_type: DataType, items: Vec<Value>) -> Self {
        Self {
            data_type,
            items: items.into(),
        }
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

/// A dictionary: ordered key/value entries.
#[derive(Debug, Clone, PartialEq)]
pub struct MapValue {
    data_type: DataType,
    entries: Arc<[(Value, Value)]>,
}

impl MapValue {
    pub fn new(data_type: DataType, entries: Vec<(Value, Value)>) -> Self {
        Self {
            data_type,
            entries: entries.into(),
        }
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }
}
