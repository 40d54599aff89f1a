//! Collection contracts: arrays, lists and dictionaries.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::class::ClassContract;
use crate::error::{ContractError, Result};
use crate::types::{ARRAYS_NAMESPACE, DataType, QualifiedName};
use crate::value::{KeyValue, Value};

/// Shape of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionKind {
    Array,
    Dictionary,
    GenericDictionary,
    Collection,
}

impl CollectionKind {
    /// Whether entries are key/value pairs written through an item contract.
    pub fn is_dictionary(self) -> bool {
        matches!(
            self,
            CollectionKind::Dictionary | CollectionKind::GenericDictionary
        )
    }
}

/// Immutable description of a collection shape.
#[derive(Debug)]
pub struct CollectionContract {
    kind: CollectionKind,
    data_type: DataType,
    stable_name: QualifiedName,
    namespace: String,
    item_type: DataType,
    item_name: String,
    item_contract: Option<Arc<ClassContract>>,
}

impl CollectionContract {
    pub fn builder(
        kind: CollectionKind,
        data_type: DataType,
        stable_name: QualifiedName,
        item_type: DataType,
    ) -> CollectionContractBuilder {
        CollectionContractBuilder {
            kind,
            data_type,
            stable_name,
            item_type,
            namespace: None,
            item_name: None,
            item_contract: None,
        }
    }

    /// Contract for a plain array of `item_type` in `namespace`.
    pub fn array(item_type: DataType, namespace: &str) -> Self {
        let item_name = item_type.default_item_name();
        Self {
            kind: CollectionKind::Array,
            data_type: DataType::array(item_type.clone()),
            stable_name: QualifiedName::new(format!("ArrayOf{item_name}"), namespace),
            namespace: namespace.to_string(),
            item_type,
            item_name,
            item_contract: None,
        }
    }

    /// Contract for an array of a primitive, in the shared arrays namespace.
    pub fn primitive_array(item_type: DataType) -> Self {
        Self::array(item_type, ARRAYS_NAMESPACE)
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn stable_name(&self) -> &QualifiedName {
        &self.stable_name
    }

    /// Namespace of the item elements.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn item_type(&self) -> &DataType {
        &self.item_type
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    /// Entry contract of dictionary kinds.
    pub fn item_contract(&self) -> Option<&Arc<ClassContract>> {
        self.item_contract.as_ref()
    }

    /// Declared type of the values produced by [`CollectionContract::enumerate`].
    pub fn enumerated_type(&self) -> &DataType {
        &self.item_type
    }

    /// Number of entries held by `value`.
    pub fn collection_count(&self, value: &Value) -> Result<usize> {
        match value {
            Value::Array(array) => Ok(array.len()),
            Value::Collection(collection) => Ok(collection.items().len()),
            Value::Map(map) => Ok(map.entries().len()),
            other => Err(self.unexpected(other)),
        }
    }

    /// Enumerates the items of `value`. Dictionary entries come out as
    /// key/value pairs typed with the contract's item type.
    pub fn enumerate<'a>(
        &'a self,
        value: &'a Value,
    ) -> Result<Box<dyn Iterator<Item = Value> + 'a>> {
        match value {
            Value::Array(array) => Ok(Box::new(array.iter())),
            Value::Collection(collection) => Ok(Box::new(collection.items().iter().cloned())),
            Value::Map(map) => Ok(Box::new(map.entries().iter().map(move |(key, value)| {
                Value::KeyValue(Arc::new(KeyValue::new(
                    self.item_type.clone(),
                    key.clone(),
                    value.clone(),
                )))
            }))),
            other => Err(self.unexpected(other)),
        }
    }

    fn unexpected(&self, found: &Value) -> ContractError {
        ContractError::UnexpectedValue {
            expected: format!("collection of type {}", self.data_type),
            found: found.kind_name(),
        }
    }
}

/// Builds a [`CollectionContract`].
#[derive(Debug)]
pub struct CollectionContractBuilder {
    kind: CollectionKind,
    data_type: DataType,
    stable_name: QualifiedName,
    item_type: DataType,
    namespace: Option<String>,
    item_name: Option<String>,
    item_contract: Option<Arc<ClassContract>>,
}

impl CollectionContractBuilder {
    /// Item element namespace; defaults to the stable name's namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Item element name; defaults to the item type's name.
    pub fn item_name(mut self, item_name: impl Into<String>) -> Self {
        self.item_name = Some(item_name.into());
        self
    }

    pub fn item_contract(mut self, item_contract: Arc<ClassContract>) -> Self {
        self.item_contract = Some(item_contract);
        self
    }

    pub fn build(self) -> Result<CollectionContract> {
        if self.kind.is_dictionary() && self.item_contract.is_none() {
            return Err(ContractError::MissingItemContract {
                contract: self.stable_name.to_string(),
            });
        }
        Ok(CollectionContract {
            namespace: self
                .namespace
                .unwrap_or_else(|| self.stable_name.namespace.clone()),
            item_name: self
                .item_name
                .unwrap_or_else(|| self.item_type.default_item_name()),
            kind: self.kind,
            data_type: self.data_type,
            stable_name: self.stable_name,
            item_type: self.item_type,
            item_contract: self.item_contract,
        })
    }
}
