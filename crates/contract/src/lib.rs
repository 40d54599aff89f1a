//! # Helios Data Contract Model
//!
//! Immutable metadata describing how in-memory values map onto an XML element
//! shape. The contract XML writer (`helios-contract-xml`) consumes it.
//!
//! ## Overview
//!
//! - [`DataType`]: identity of a declared or runtime type.
//! - [`Value`]: the in-memory value being written.
//! - [`ClassContract`]: ordered [`DataMember`]s over an inheritance chain, with
//!   the member layout flattened base-first at build time.
//! - [`CollectionContract`]: arrays, lists and dictionaries.
//! - [`ContractSet`]: contracts keyed by type identity.
//!
//! Contracts are built once and never change afterwards, so a
//! [`ContractSet`] behind an `Arc` can serve concurrent writes.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use helios_contract::{ClassContract, DataMember, DataType, PrimitiveType, QualifiedName};
//!
//! let base = Arc::new(
//!     ClassContract::builder(DataType::Class("Base".into()), QualifiedName::new("Base", "urn:m"))
//!         .member(DataMember::new("X", DataType::Primitive(PrimitiveType::Int32)))
//!         .build()?,
//! );
//! let derived = ClassContract::builder(DataType::Class("Derived".into()), QualifiedName::new("Derived", "urn:m"))
//!     .base(base)
//!     .member(DataMember::new("Y", DataType::Primitive(PrimitiveType::String)))
//!     .build()?;
//! assert_eq!(derived.member_names(), ["X", "Y"]);
//! # Ok::<(), helios_contract::ContractError>(())
//! ```

pub mod class;
pub mod collection;
pub mod error;
pub mod lifecycle;
pub mod member;
pub mod set;
pub mod types;
pub mod value;

pub use class::{ClassContract, ClassContractBuilder};
pub use collection::{CollectionContract, CollectionContractBuilder, CollectionKind};
pub use error::{ContractError, Result};
pub use lifecycle::{LifecycleHook, StreamingContext, StreamingState};
pub use member::{DataMember, MemberAccessor};
pub use set::{ContractSet, DataContract};
pub use types::{DataType, PrimitiveType, QualifiedName};
pub use value::{ArrayValue, CollectionValue, KeyValue, MapValue, ObjectValue, Value};
