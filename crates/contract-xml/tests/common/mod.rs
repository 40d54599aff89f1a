//! Shared helpers for the contract XML integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use helios_contract::{
    ClassContract, ContractSet, DataMember, DataType, PrimitiveType, QualifiedName,
};
use helios_contract_xml::{Result, XmlSink};
use rust_decimal::Decimal;

pub const NS: &str = "http://example.com/model";

/// One call made on a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Start {
        prefix: Option<String>,
        name: String,
        namespace: String,
    },
    End,
    NamespaceDecl(String),
    PrefixDecl(String, String),
    Attribute {
        name: String,
        value: String,
    },
    Text(String),
    QualifiedName(QualifiedName),
    XsiType(QualifiedName),
    XsiNil,
    /// One batched array write.
    BulkArray {
        kind: &'static str,
        len: usize,
        item_name: String,
    },
}

/// Sink that records every call instead of producing XML.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local names of started elements, in order.
    pub fn started(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Start { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn xsi_types(&self) -> Vec<&QualifiedName> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::XsiType(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &SinkEvent) -> usize {
        self.events.iter().filter(|event| *event == wanted).count()
    }

    pub fn bulk_writes(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SinkEvent::BulkArray { .. }))
            .count()
    }

    fn bulk(&mut self, kind: &'static str, len: usize, item_name: &str) -> Result<()> {
        self.events.push(SinkEvent::BulkArray {
            kind,
            len,
            item_name: item_name.to_string(),
        });
        Ok(())
    }
}

impl XmlSink for RecordingSink {
    fn write_start_element(
        &mut self,
        prefix: Option<&str>,
        local_name: &str,
        namespace: &str,
    ) -> Result<()> {
        self.events.push(SinkEvent::Start {
            prefix: prefix.map(str::to_string),
            name: local_name.to_string(),
            namespace: namespace.to_string(),
        });
        Ok(())
    }

    fn write_end_element(&mut self) -> Result<()> {
        self.events.push(SinkEvent::End);
        Ok(())
    }

    fn write_namespace_decl(&mut self, namespace: &str) -> Result<()> {
        self.events.push(SinkEvent::NamespaceDecl(namespace.to_string()));
        Ok(())
    }

    fn write_prefix_decl(&mut self, prefix: &str, namespace: &str) -> Result<()> {
        self.events.push(SinkEvent::PrefixDecl(prefix.to_string(), namespace.to_string()));
        Ok(())
    }

    fn write_attribute(
        &mut self,
        prefix: Option<&str>,
        local_name: &str,
        _namespace: &str,
        value: &str,
    ) -> Result<()> {
        let name = match prefix {
            Some(prefix) => format!("{prefix}:{local_name}"),
            None => local_name.to_string(),
        };
        self.events.push(SinkEvent::Attribute {
            name,
            value: value.to_string(),
        });
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.events.push(SinkEvent::Text(text.to_string()));
        Ok(())
    }

    fn write_qualified_name(&mut self, name: &str, namespace: &str) -> Result<()> {
        self.events.push(SinkEvent::QualifiedName(QualifiedName::new(name, namespace)));
        Ok(())
    }

    fn write_xsi_type(&mut self, type_name: &QualifiedName) -> Result<()> {
        self.events.push(SinkEvent::XsiType(type_name.clone()));
        Ok(())
    }

    fn write_xsi_nil(&mut self) -> Result<()> {
        self.events.push(SinkEvent::XsiNil);
        Ok(())
    }

    fn write_bool_array(
        &mut self,
        items: &[bool],
        item_name: &str,
        _namespace: &str,
    ) -> Result<()> {
        self.bulk("bool", items.len(), item_name)
    }

    fn write_date_time_array(
        &mut self,
        items: &[DateTime<Utc>],
        item_name: &str,
        _namespace: &str,
    ) -> Result<()> {
        self.bulk("dateTime", items.len(), item_name)
    }

    fn write_decimal_array(
        &mut self,
        items: &[Decimal],
        item_name: &str,
        _namespace: &str,
    ) -> Result<()> {
        self.bulk("decimal", items.len(), item_name)
    }

    fn write_i32_array(&mut self, items: &[i32], item_name: &str, _namespace: &str) -> Result<()> {
        self.bulk("i32", items.len(), item_name)
    }

    fn write_i64_array(&mut self, items: &[i64], item_name: &str, _namespace: &str) -> Result<()> {
        self.bulk("i64", items.len(), item_name)
    }

    fn write_f32_array(&mut self, items: &[f32], item_name: &str, _namespace: &str) -> Result<()> {
        self.bulk("f32", items.len(), item_name)
    }

    fn write_f64_array(&mut self, items: &[f64], item_name: &str, _namespace: &str) -> Result<()> {
        self.bulk("f64", items.len(), item_name)
    }
}

pub fn int() -> DataType {
    DataType::Primitive(PrimitiveType::Int32)
}

pub fn string() -> DataType {
    DataType::Primitive(PrimitiveType::String)
}

pub fn class(name: &str) -> DataType {
    DataType::Class(name.to_string())
}

/// `Base { X: int }` and `Derived : Base { Y: string }`.
pub fn base_and_derived() -> (Arc<ClassContract>, Arc<ClassContract>) {
    let base = Arc::new(
        ClassContract::builder(class("Base"), QualifiedName::new("Base", NS))
            .member(DataMember::new("X", int()))
            .build()
            .unwrap(),
    );
    let derived = Arc::new(
        ClassContract::builder(class("Derived"), QualifiedName::new("Derived", NS))
            .base(base.clone())
            .member(DataMember::new("Y", string()))
            .build()
            .unwrap(),
    );
    (base, derived)
}

/// `Base { Id: int }` and `Derived : Base { Id: string }` in one namespace.
///
/// The inherited member reads field `BaseId`, the redeclared one field `Id`.
pub fn id_collision() -> (Arc<ClassContract>, Arc<ClassContract>) {
    let base = Arc::new(
        ClassContract::builder(class("Base"), QualifiedName::new("Base", NS))
            .member(DataMember::new("Id", int()).with_field_key("BaseId"))
            .build()
            .unwrap(),
    );
    let derived = Arc::new(
        ClassContract::builder(class("Derived"), QualifiedName::new("Derived", NS))
            .base(base.clone())
            .member(DataMember::new("Id", string()))
            .build()
            .unwrap(),
    );
    (base, derived)
}

/// A contract set holding every contract of the given chain.
pub fn contract_set(contracts: &[&Arc<ClassContract>]) -> ContractSet {
    let mut set = ContractSet::new();
    for contract in contracts {
        set.insert_class(Arc::clone(contract));
    }
    set
}
