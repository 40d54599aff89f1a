//! Data members of a class contract.

use std::fmt;
use std::sync::Arc;

use crate::error::{ContractError, Result};
use crate::types::DataType;
use crate::value::{ObjectValue, Value};

type AccessorFn = dyn Fn(&ObjectValue) -> Result<Value> + Send + Sync;

/// Reads a member's value out of its owning object.
#[derive(Clone)]
pub enum MemberAccessor {
    /// Reads the stored field with this key.
    Field(String),
    /// Runs caller code; its errors propagate unchanged.
    Computed(Arc<AccessorFn>),
}

impl MemberAccessor {
    pub fn field(key: impl Into<String>) -> Self {
        MemberAccessor::Field(key.into())
    }

    pub fn computed<F>(accessor: F) -> Self
    where
        F: Fn(&ObjectValue) -> Result<Value> + Send + Sync + 'static,
    {
        MemberAccessor::Computed(Arc::new(accessor))
    }

    /// Reads the member from `owner`, which must be an object.
    pub fn get(&self, owner: &Value) -> Result<Value> {
        let object = owner
            .as_object()
            .ok_or_else(|| ContractError::UnexpectedValue {
                expected: "object".to_string(),
                found: owner.kind_name(),
            })?;
        match self {
            MemberAccessor::Field(key) => {
                object
                    .field(key)
                    .cloned()
                    .ok_or_else(|| ContractError::MissingField {
                        type_name: object.data_type().to_string(),
                        field: key.clone(),
                    })
            }
            MemberAccessor::Computed(accessor) => accessor(object),
        }
    }
}

impl fmt::Debug for MemberAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberAccessor::Field(key) => f.debug_tuple("Field").field(key).finish(),
            MemberAccessor::Computed(_) => f.write_str("Computed"),
        }
    }
}

/// One serializable member of a class contract.
#[derive(Debug, Clone)]
pub struct DataMember {
    name: String,
    member_type: DataType,
    accessor: MemberAccessor,
    is_get_only_collection: bool,
    child_namespace: Option<String>,
    conflicting_member: Option<Arc<DataMember>>,
}

impl DataMember {
    /// New member whose accessor reads the field named like the member.
    pub fn new(name: impl Into<String>, member_type: DataType) -> Self {
        let name = name.into();
        Self {
            accessor: MemberAccessor::Field(name.clone()),
            name,
            member_type,
            is_get_only_collection: false,
            child_namespace: None,
            conflicting_member: None,
        }
    }

    pub fn with_accessor(mut self, accessor: MemberAccessor) -> Self {
        self.accessor = accessor;
        self
    }

    /// Shorthand for a field accessor with an explicit key.
    pub fn with_field_key(self, key: impl Into<String>) -> Self {
        self.with_accessor(MemberAccessor::field(key))
    }

    /// Marks the member as a collection without a setter.
    pub fn get_only_collection(mut self) -> Self {
        self.is_get_only_collection = true;
        self
    }

    /// Namespace declared on the member element before its content.
    pub fn with_child_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.child_namespace = Some(namespace.into());
        self
    }

    /// Links to the next same-named member up the inheritance chain.
    ///
    /// Contract builders set this automatically; an explicit link wins.
    pub fn with_conflicting_member(mut self, member: Arc<DataMember>) -> Self {
        self.conflicting_member = Some(member);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member_type(&self) -> &DataType {
        &self.member_type
    }

    pub fn accessor(&self) -> &MemberAccessor {
        &self.accessor
    }

    pub fn is_get_only_collection(&self) -> bool {
        self.is_get_only_collection
    }

    pub fn child_namespace(&self) -> Option<&str> {
        self.child_namespace.as_deref()
    }

    pub fn conflicting_member(&self) -> Option<&Arc<DataMember>> {
        self.conflicting_member.as_ref()
    }

    /// Reads this member's value from `owner`.
    pub fn get_value(&self, owner: &Value) -> Result<Value> {
        self.accessor.get(owner)
    }
}
