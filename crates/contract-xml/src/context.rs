//! Per-write state: quotas, null markers and contract lookup for nested values.

use std::sync::Arc;

use helios_contract::{
    CollectionContract, ContractSet, DataContract, DataType, StreamingContext, Value,
    types::ARRAYS_NAMESPACE,
};
use tracing::{debug, trace};

use crate::config::WriterSettings;
use crate::error::{Result, WriteError};
use crate::primitive::PrimitiveContract;
use crate::sink::XmlSink;
use crate::writer;

/// Services the writer needs from its caller during one write.
///
/// A context belongs to exactly one in-flight write.
pub trait WriteContext {
    /// Argument handed to lifecycle hooks.
    fn streaming_context(&self) -> StreamingContext;

    /// Counts `count` written items against the quota.
    fn increment_item_count(&mut self, count: usize) -> Result<()>;

    fn increment_array_count<S>(&mut self, sink: &mut S, len: usize) -> Result<()>
    where
        S: XmlSink + ?Sized;

    fn increment_collection_count<S>(&mut self, sink: &mut S, count: usize) -> Result<()>
    where
        S: XmlSink + ?Sized;

    /// Signals that the member being written has no setter.
    fn store_is_get_only_collection(&mut self);

    fn is_type_serializable(&self, data_type: &DataType) -> bool;

    /// Writes the null marker on the open element.
    fn write_null<S>(
        &mut self,
        sink: &mut S,
        data_type: &DataType,
        is_serializable: bool,
    ) -> Result<()>
    where
        S: XmlSink + ?Sized;

    /// Writes a nested value through the contract of its runtime type.
    ///
    /// `xsi:type` is written when `write_xsi_type` is set or the runtime
    /// type is not the declared one.
    fn internal_serialize_reference<S>(
        &mut self,
        sink: &mut S,
        value: &Value,
        is_declared_type: bool,
        write_xsi_type: bool,
        declared_type: &DataType,
    ) -> Result<()>
    where
        S: XmlSink + ?Sized;
}

/// Contract of an array type nobody registered. Items of a registered type
/// share its namespace; anything else lives in the arrays namespace.
pub(crate) fn array_contract(contracts: &ContractSet, item_type: &DataType) -> CollectionContract {
    let namespace = match contracts.get(item_type) {
        Some(contract) => contract.stable_name().namespace.clone(),
        None => ARRAYS_NAMESPACE.to_string(),
    };
    debug!(item_type = %item_type, namespace = %namespace, "synthesizing array contract");
    CollectionContract::array(item_type.clone(), &namespace)
}

/// Contract resolved for a nested value.
enum Resolved {
    Primitive(&'static PrimitiveContract),
    Data(DataContract),
}

/// The default context: contract lookup in a [`ContractSet`], item and
/// depth limits from [`WriterSettings`].
#[derive(Debug)]
pub struct XmlWriteContext<'a> {
    contracts: &'a ContractSet,
    settings: &'a WriterSettings,
    item_count: usize,
    depth: usize,
    is_get_only_collection: bool,
}

impl<'a> XmlWriteContext<'a> {
    pub fn new(contracts: &'a ContractSet, settings: &'a WriterSettings) -> Self {
        Self {
            contracts,
            settings,
            item_count: 0,
            depth: 0,
            is_get_only_collection: false,
        }
    }

    /// Items counted so far.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Returns and clears the get-only collection signal.
    pub fn take_is_get_only_collection(&mut self) -> bool {
        std::mem::take(&mut self.is_get_only_collection)
    }

    fn resolve(&self, data_type: &DataType) -> Result<Resolved> {
        if let Some(primitive) =
            PrimitiveContract::for_type(data_type).filter(|primitive| !primitive.is_object())
        {
            return Ok(Resolved::Primitive(primitive));
        }
        if let Some(contract) = self.contracts.get(data_type) {
            return Ok(Resolved::Data(contract.clone()));
        }
        if let DataType::Array(item) = data_type {
            let contract = array_contract(self.contracts, item);
            return Ok(Resolved::Data(DataContract::Collection(Arc::new(contract))));
        }
        Err(WriteError::UnknownType {
            type_name: data_type.to_string(),
        })
    }
}

impl WriteContext for XmlWriteContext<'_> {
    fn streaming_context(&self) -> StreamingContext {
        StreamingContext::new(self.settings.streaming_state)
    }

    fn increment_item_count(&mut self, count: usize) -> Result<()> {
        self.item_count = self.item_count.saturating_add(count);
        if self.item_count > self.settings.max_items_in_object_graph {
            return Err(WriteError::QuotaExceeded {
                limit: self.settings.max_items_in_object_graph,
            });
        }
        Ok(())
    }

    fn increment_array_count<S>(&mut self, _sink: &mut S, len: usize) -> Result<()>
    where
        S: XmlSink + ?Sized,
    {
        self.increment_item_count(len)
    }

    fn increment_collection_count<S>(&mut self, _sink: &mut S, count: usize) -> Result<()>
    where
        S: XmlSink + ?Sized,
    {
        self.increment_item_count(count)
    }

    fn store_is_get_only_collection(&mut self) {
        self.is_get_only_collection = true;
    }

    fn is_type_serializable(&self, data_type: &DataType) -> bool {
        self.contracts.is_type_serializable(data_type)
    }

    fn write_null<S>(
        &mut self,
        sink: &mut S,
        data_type: &DataType,
        is_serializable: bool,
    ) -> Result<()>
    where
        S: XmlSink + ?Sized,
    {
        if !is_serializable {
            return Err(WriteError::NotSerializable {
                type_name: data_type.to_string(),
            });
        }
        sink.write_xsi_nil()
    }

    fn internal_serialize_reference<S>(
        &mut self,
        sink: &mut S,
        value: &Value,
        is_declared_type: bool,
        write_xsi_type: bool,
        declared_type: &DataType,
    ) -> Result<()>
    where
        S: XmlSink + ?Sized,
    {
        let runtime_type = value.runtime_type();
        let resolved = self.resolve(&runtime_type)?;
        if write_xsi_type || !is_declared_type {
            let stable_name = match &resolved {
                Resolved::Primitive(primitive) => primitive.stable_name(),
                Resolved::Data(contract) => contract.stable_name().clone(),
            };
            trace!(declared = %declared_type, runtime = %runtime_type, "writing xsi:type");
            sink.write_xsi_type(&stable_name)?;
        }

        match resolved {
            Resolved::Primitive(primitive) => primitive.write_value(sink, value),
            Resolved::Data(contract) => {
                self.depth += 1;
                if self.depth > self.settings.max_depth {
                    return Err(WriteError::DepthExceeded {
                        limit: self.settings.max_depth,
                    });
                }
                match contract {
                    DataContract::Class(contract) => {
                        writer::write_class(sink, value, self, &contract)?
                    }
                    DataContract::Collection(contract) => {
                        writer::write_collection(sink, value, self, &contract)?
                    }
                }
                self.depth -= 1;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helios_contract::PrimitiveType;

    #[test]
    fn test_item_quota() {
        let contracts = ContractSet::new();
        let settings = WriterSettings {
            max_items_in_object_graph: 3,
            ..WriterSettings::default()
        };
        let mut context = XmlWriteContext::new(&contracts, &settings);
        context.increment_item_count(2).unwrap();
        context.increment_item_count(1).unwrap();
        assert!(matches!(
            context.increment_item_count(1),
            Err(WriteError::QuotaExceeded { limit: 3 })
        ));
    }

    #[test]
    fn test_get_only_collection_signal() {
        let contracts = ContractSet::new();
        let settings = WriterSettings::default();
        let mut context = XmlWriteContext::new(&contracts, &settings);
        assert!(!context.take_is_get_only_collection());
        context.store_is_get_only_collection();
        assert!(context.take_is_get_only_collection());
        assert!(!context.take_is_get_only_collection());
    }

    #[test]
    fn test_resolve_synthesizes_array_contracts() {
        let contracts = ContractSet::new();
        let settings = WriterSettings::default();
        let context = XmlWriteContext::new(&contracts, &settings);
        let array = DataType::array(DataType::Primitive(PrimitiveType::String));
        match context.resolve(&array).unwrap() {
            Resolved::Data(DataContract::Collection(contract)) => {
                assert_eq!(contract.stable_name().name, "ArrayOfstring");
                assert_eq!(contract.namespace(), ARRAYS_NAMESPACE);
            }
            _ => panic!("expected a collection contract"),
        }
        assert!(matches!(
            context.resolve(&DataType::Class("Missing".into())),
            Err(WriteError::UnknownType { .. })
        ));
    }
}
