//! Registry of contracts keyed by type identity.

use std::collections::HashMap;
use std::sync::Arc;

use crate::class::ClassContract;
use crate::collection::CollectionContract;
use crate::types::{DataType, QualifiedName};

/// A class or collection contract.
#[derive(Debug, Clone)]
pub enum DataContract {
    Class(Arc<ClassContract>),
    Collection(Arc<CollectionContract>),
}

impl DataContract {
    pub fn stable_name(&self) -> &QualifiedName {
        match self {
            DataContract::Class(contract) => contract.stable_name(),
            DataContract::Collection(contract) => contract.stable_name(),
        }
    }

    pub fn data_type(&self) -> &DataType {
        match self {
            DataContract::Class(contract) => contract.data_type(),
            DataContract::Collection(contract) => contract.data_type(),
        }
    }
}

/// Contracts available to a write, looked up by runtime type identity.
///
/// The set is immutable once shared and can back any number of concurrent
/// writes.
#[derive(Debug, Clone)]
pub struct ContractSet {
    contracts: HashMap<DataType, DataContract>,
}

impl Default for ContractSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractSet {
    /// A set holding only the well-known date-time-offset adapter contract.
    pub fn new() -> Self {
        let mut set = Self {
            contracts: HashMap::new(),
        };
        set.insert_class(Arc::new(ClassContract::date_time_offset()));
        set
    }

    /// Registers a class contract under its data type, replacing any previous one.
    pub fn insert_class(&mut self, contract: Arc<ClassContract>) -> &mut Self {
        self.contracts
            .insert(contract.data_type().clone(), DataContract::Class(contract));
        self
    }

    /// Registers a collection contract under its data type.
    pub fn insert_collection(&mut self, contract: Arc<CollectionContract>) -> &mut Self {
        self.contracts.insert(
            contract.data_type().clone(),
            DataContract::Collection(contract),
        );
        self
    }

    pub fn with_class(mut self, contract: Arc<ClassContract>) -> Self {
        self.insert_class(contract);
        self
    }

    pub fn with_collection(mut self, contract: Arc<CollectionContract>) -> Self {
        self.insert_collection(contract);
        self
    }

    pub fn get(&self, data_type: &DataType) -> Option<&DataContract> {
        self.contracts.get(data_type)
    }

    pub fn class(&self, data_type: &DataType) -> Option<&Arc<ClassContract>> {
        match self.contracts.get(data_type) {
            Some(DataContract::Class(contract)) => Some(contract),
            _ => None,
        }
    }

    pub fn collection(&self, data_type: &DataType) -> Option<&Arc<CollectionContract>> {
        match self.contracts.get(data_type) {
            Some(DataContract::Collection(contract)) => Some(contract),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Whether values of `data_type` can be written at all.
    ///
    /// Primitives, the erased top types, arrays and the adapter shapes are
    /// always serializable; named types only when a contract is registered.
    pub fn is_type_serializable(&self, data_type: &DataType) -> bool {
        match data_type {
            DataType::Object
            | DataType::ValueType
            | DataType::Primitive(_)
            | DataType::DateTimeOffset
            | DataType::KeyValuePair(..) => true,
            DataType::Nullable(args) => match args.as_slice() {
                [inner] => self.is_type_serializable(inner),
                _ => false,
            },
            DataType::Array(item) => self.is_type_serializable(item),
            DataType::Struct(_) | DataType::Class(_) | DataType::Collection(_) => {
                self.contracts.contains_key(data_type)
            }
        }
    }
}
