//! # Helios Contract XML Writer
//!
//! Writes values described by [`helios_contract`] contracts as XML in the
//! data contract format: one element per member, base members before derived
//! ones, `xsi:type` wherever the declared type does not pin down the runtime
//! type, `i:nil` for nulls.
//!
//! ## Overview
//!
//! - [`to_xml_string`], [`to_xml_vec`], [`to_xml_writer`]: one-shot writes
//!   with default settings.
//! - [`XmlContractSerializer`]: a shared contract set plus [`WriterSettings`].
//! - [`write_class`] and [`write_collection`]: the content writers, for
//!   callers that open the container element themselves.
//! - [`XmlSink`] and [`WriteContext`]: the seams between the writer, the
//!   output and per-write state. [`QuickXmlSink`] and [`XmlWriteContext`] are
//!   the defaults.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use helios_contract::{ClassContract, ContractSet, DataMember, DataType, ObjectValue, PrimitiveType, QualifiedName, Value};
//! use helios_contract_xml::XmlContractSerializer;
//!
//! let base_type = DataType::Class("Base".into());
//! let derived_type = DataType::Class("Derived".into());
//! let base = Arc::new(
//!     ClassContract::builder(base_type, QualifiedName::new("Base", "urn:m"))
//!         .member(DataMember::new("X", DataType::Primitive(PrimitiveType::Int32)))
//!         .build()?,
//! );
//! let derived = ClassContract::builder(derived_type.clone(), QualifiedName::new("Derived", "urn:m"))
//!     .base(base.clone())
//!     .member(DataMember::new("Y", DataType::Primitive(PrimitiveType::String)))
//!     .build()?;
//! let contracts = ContractSet::new().with_class(base).with_class(Arc::new(derived));
//!
//! let value = Value::Object(
//!     ObjectValue::new(derived_type.clone())
//!         .with_field("X", 1)
//!         .with_field("Y", "a"),
//! );
//! let xml = XmlContractSerializer::new(Arc::new(contracts)).to_string(&value, &derived_type)?;
//! assert!(xml.ends_with("<X>1</X><Y>a</Y></Derived>"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod primitive;
pub mod serializer;
pub mod sink;
pub mod writer;
pub mod xml;

pub use config::WriterSettings;
pub use context::{WriteContext, XmlWriteContext};
pub use error::{Result, WriteError};
pub use primitive::PrimitiveContract;
pub use serializer::{XmlContractSerializer, to_xml_string, to_xml_vec, to_xml_writer};
pub use sink::XmlSink;
pub use writer::{write_class, write_collection};
pub use xml::QuickXmlSink;
