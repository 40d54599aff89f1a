//! Type identities used by contracts and runtime values.
//!
//! A [`DataType`] plays the role of a runtime type handle: two values share a
//! contract exactly when their data types compare equal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ContractError, Result};

/// XML Schema namespace, home of most primitive stable names.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Namespace of serialization-specific primitives (`char`, `duration`, `guid`).
pub const SERIALIZATION_NAMESPACE: &str = "http://schemas.microsoft.com/2003/10/Serialization/";

/// Default namespace of arrays of primitives.
pub const ARRAYS_NAMESPACE: &str = "http://schemas.microsoft.com/2003/10/Serialization/Arrays";

/// Namespace of the well-known system value shapes.
pub const SYSTEM_NAMESPACE: &str = "http://schemas.datacontract.org/2004/07/System";

/// Namespace of the generic key/value pair shape.
pub const GENERIC_COLLECTIONS_NAMESPACE: &str =
    "http://schemas.datacontract.org/2004/07/System.Collections.Generic";

/// Namespace-qualified XML name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Local name.
    pub name: String,
    /// Namespace URI, empty for no namespace.
    pub namespace: String,
}

impl QualifiedName {
    /// Creates a new qualified name.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.name)
        }
    }
}

/// Closed set of primitive runtime types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    DateTime,
    TimeSpan,
    Guid,
    String,
    ByteArray,
    Uri,
    QualifiedName,
}

impl PrimitiveType {
    /// Every primitive type, in declaration order.
    pub const ALL: [PrimitiveType; 20] = [
        PrimitiveType::Boolean,
        PrimitiveType::Char,
        PrimitiveType::SByte,
        PrimitiveType::Byte,
        PrimitiveType::Int16,
        PrimitiveType::UInt16,
        PrimitiveType::Int32,
        PrimitiveType::UInt32,
        PrimitiveType::Int64,
        PrimitiveType::UInt64,
        PrimitiveType::Single,
        PrimitiveType::Double,
        PrimitiveType::Decimal,
        PrimitiveType::DateTime,
        PrimitiveType::TimeSpan,
        PrimitiveType::Guid,
        PrimitiveType::String,
        PrimitiveType::ByteArray,
        PrimitiveType::Uri,
        PrimitiveType::QualifiedName,
    ];

    /// Returns false for the reference-like primitives, which may hold null.
    pub fn is_value_type(self) -> bool {
        !matches!(
            self,
            PrimitiveType::String
                | PrimitiveType::ByteArray
                | PrimitiveType::Uri
                | PrimitiveType::QualifiedName
        )
    }

    /// Local part of the schema stable name.
    pub fn xsd_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Char => "char",
            PrimitiveType::SByte => "byte",
            PrimitiveType::Byte => "unsignedByte",
            PrimitiveType::Int16 => "short",
            PrimitiveType::UInt16 => "unsignedShort",
            PrimitiveType::Int32 => "int",
            PrimitiveType::UInt32 => "unsignedInt",
            PrimitiveType::Int64 => "long",
            PrimitiveType::UInt64 => "unsignedLong",
            PrimitiveType::Single => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Decimal => "decimal",
            PrimitiveType::DateTime => "dateTime",
            PrimitiveType::TimeSpan => "duration",
            PrimitiveType::Guid => "guid",
            PrimitiveType::String => "string",
            PrimitiveType::ByteArray => "base64Binary",
            PrimitiveType::Uri => "anyURI",
            PrimitiveType::QualifiedName => "QName",
        }
    }

    /// Stable name used for `xsi:type` annotations.
    pub fn stable_name(self) -> QualifiedName {
        let namespace = match self {
            PrimitiveType::Char | PrimitiveType::TimeSpan | PrimitiveType::Guid => {
                SERIALIZATION_NAMESPACE
            }
            _ => XSD_NAMESPACE,
        };
        QualifiedName::new(self.xsd_name(), namespace)
    }
}

/// Identity of a declared or runtime type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// The untyped top type.
    Object,
    /// The abstract base of all value types.
    ValueType,
    /// A primitive with direct text serialization.
    Primitive(PrimitiveType),
    /// Nullable-of-T. Well formed only with exactly one generic argument.
    Nullable(Vec<DataType>),
    /// Timestamp with a UTC offset, written through an adapter.
    DateTimeOffset,
    /// Generic key/value pair, written through an adapter.
    KeyValuePair(Box<DataType>, Box<DataType>),
    /// Single-dimension array of the item type.
    Array(Box<DataType>),
    /// Named value type with a class contract.
    Struct(String),
    /// Named reference type with a class contract.
    Class(String),
    /// Named collection type with a collection contract.
    Collection(String),
}

impl DataType {
    /// Shorthand for a primitive type.
    pub fn primitive(primitive: PrimitiveType) -> Self {
        DataType::Primitive(primitive)
    }

    /// Shorthand for a well-formed nullable wrapper.
    pub fn nullable(inner: DataType) -> Self {
        DataType::Nullable(vec![inner])
    }

    /// Shorthand for an array of `item`.
    pub fn array(item: DataType) -> Self {
        DataType::Array(Box::new(item))
    }

    /// Shorthand for a key/value pair type.
    pub fn key_value_pair(key: DataType, value: DataType) -> Self {
        DataType::KeyValuePair(Box::new(key), Box::new(value))
    }

    /// Whether instances are value types. The erased `ValueType` base itself is not.
    pub fn is_value_type(&self) -> bool {
        match self {
            DataType::Primitive(primitive) => primitive.is_value_type(),
            DataType::Nullable(_)
            | DataType::DateTimeOffset
            | DataType::KeyValuePair(..)
            | DataType::Struct(_) => true,
            DataType::Object
            | DataType::ValueType
            | DataType::Array(_)
            | DataType::Class(_)
            | DataType::Collection(_) => false,
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, DataType::Nullable(_))
    }

    /// The type wrapped by a nullable.
    ///
    /// Fails when the wrapper does not carry exactly one argument, which means
    /// the contract that declared it was built incorrectly.
    pub fn nullable_argument(&self) -> Result<&DataType> {
        match self {
            DataType::Nullable(args) if args.len() == 1 => Ok(&args[0]),
            _ => Err(ContractError::InvalidNullable {
                type_name: self.to_string(),
            }),
        }
    }

    /// Whether this is one of the erased top types (`Object`, `ValueType`).
    pub fn is_erased(&self) -> bool {
        matches!(self, DataType::Object | DataType::ValueType)
    }

    /// Element name used for items of this type inside a collection.
    pub fn default_item_name(&self) -> String {
        match self {
            DataType::Object | DataType::ValueType => "anyType".to_string(),
            DataType::Primitive(primitive) => primitive.xsd_name().to_string(),
            DataType::Nullable(args) => match args.as_slice() {
                [inner] => inner.default_item_name(),
                _ => "anyType".to_string(),
            },
            DataType::DateTimeOffset => "DateTimeOffset".to_string(),
            DataType::KeyValuePair(key, value) => format!(
                "KeyValueOf{}{}",
                key.default_item_name(),
                value.default_item_name()
            ),
            DataType::Array(item) => format!("ArrayOf{}", item.default_item_name()),
            DataType::Struct(name) | DataType::Class(name) | DataType::Collection(name) => {
                local_type_name(name).to_string()
            }
        }
    }
}

/// Last path segment of a type name (`a::b::Foo` → `Foo`).
fn local_type_name(name: &str) -> &str {
    name.rsplit(['.', ':'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(name)
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Object => write!(f, "object"),
            DataType::ValueType => write!(f, "ValueType"),
            DataType::Primitive(primitive) => write!(f, "{}", primitive.xsd_name()),
            DataType::Nullable(args) => {
                write!(f, "Nullable<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ">")
            }
            DataType::DateTimeOffset => write!(f, "DateTimeOffset"),
            DataType::KeyValuePair(key, value) => write!(f, "KeyValuePair<{key}, {value}>"),
            DataType::Array(item) => write!(f, "{item}[]"),
            DataType::Struct(name) | DataType::Class(name) | DataType::Collection(name) => {
                write!(f, "{name}")
            }
        }
    }
}
