//! Class contracts: ordered members over an inheritance chain.
//!
//! Member layout is flattened once when a contract is built. Position `i` of
//! [`ClassContract::member_names`] belongs to the `i`-th member of the chain,
//! counting the root ancestor's members first.

use std::sync::Arc;

use crate::error::{ContractError, Result};
use crate::lifecycle::LifecycleHook;
use crate::member::DataMember;
use crate::types::{DataType, PrimitiveType, QualifiedName};
use crate::types::{GENERIC_COLLECTIONS_NAMESPACE, SYSTEM_NAMESPACE};

/// Field key holding the UTC instant of a date-time-offset adapter.
pub const DATE_TIME_FIELD: &str = "DateTime";
/// Field key holding the offset, in minutes, of a date-time-offset adapter.
pub const OFFSET_MINUTES_FIELD: &str = "OffsetMinutes";
/// Field key holding the key of a key/value adapter.
pub const KEY_FIELD: &str = "key";
/// Field key holding the value of a key/value adapter.
pub const VALUE_FIELD: &str = "value";

/// Immutable description of a class or struct shape.
#[derive(Debug)]
pub struct ClassContract {
    data_type: DataType,
    stable_name: QualifiedName,
    namespace: String,
    members: Vec<Arc<DataMember>>,
    base_contract: Option<Arc<ClassContract>>,
    member_names: Vec<String>,
    child_element_namespaces: Vec<Option<String>>,
    on_serializing: Option<LifecycleHook>,
    on_serialized: Option<LifecycleHook>,
}

impl ClassContract {
    pub fn builder(data_type: DataType, stable_name: QualifiedName) -> ClassContractBuilder {
        ClassContractBuilder::new(data_type, stable_name)
    }

    /// Contract of the adapter that carries a timestamp with offset.
    pub fn date_time_offset() -> Self {
        let members = vec![
            Arc::new(DataMember::new(
                DATE_TIME_FIELD,
                DataType::Primitive(PrimitiveType::DateTime),
            )),
            Arc::new(DataMember::new(
                OFFSET_MINUTES_FIELD,
                DataType::Primitive(PrimitiveType::Int16),
            )),
        ];
        Self::from_parts(
            DataType::DateTimeOffset,
            QualifiedName::new("DateTimeOffset", SYSTEM_NAMESPACE),
            SYSTEM_NAMESPACE.to_string(),
            members,
        )
    }

    /// Contract of the adapter that carries a generic key/value pair.
    pub fn key_value_pair(key: DataType, value: DataType) -> Self {
        let stable_name = QualifiedName::new(
            format!(
                "KeyValuePairOf{}{}",
                key.default_item_name(),
                value.default_item_name()
            ),
            GENERIC_COLLECTIONS_NAMESPACE,
        );
        Self::pair_contract(key, value, stable_name, (KEY_FIELD, VALUE_FIELD))
    }

    /// Contract of one dictionary entry, written with `Key` and `Value` elements.
    pub fn dictionary_entry(key: DataType, value: DataType, namespace: &str) -> Self {
        let stable_name = QualifiedName::new(
            format!(
                "KeyValueOf{}{}",
                key.default_item_name(),
                value.default_item_name()
            ),
            namespace,
        );
        Self::pair_contract(key, value, stable_name, ("Key", "Value"))
    }

    fn pair_contract(
        key: DataType,
        value: DataType,
        stable_name: QualifiedName,
        (key_name, value_name): (&str, &str),
    ) -> Self {
        let data_type = DataType::key_value_pair(key.clone(), value.clone());
        let members = vec![
            Arc::new(DataMember::new(key_name, key).with_field_key(KEY_FIELD)),
            Arc::new(DataMember::new(value_name, value).with_field_key(VALUE_FIELD)),
        ];
        let namespace = stable_name.namespace.clone();
        Self::from_parts(data_type, stable_name, namespace, members)
    }

    fn from_parts(
        data_type: DataType,
        stable_name: QualifiedName,
        namespace: String,
        members: Vec<Arc<DataMember>>,
    ) -> Self {
        Self {
            data_type,
            stable_name,
            namespace,
            member_names: members.iter().map(|m| m.name().to_string()).collect(),
            child_element_namespaces: members
                .iter()
                .map(|m| m.child_namespace().map(str::to_string))
                .collect(),
            members,
            base_contract: None,
            on_serializing: None,
            on_serialized: None,
        }
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn stable_name(&self) -> &QualifiedName {
        &self.stable_name
    }

    /// Namespace of this contract's member elements.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Members declared by this contract, in declaration order.
    pub fn members(&self) -> &[Arc<DataMember>] {
        &self.members
    }

    pub fn base_contract(&self) -> Option<&Arc<ClassContract>> {
        self.base_contract.as_ref()
    }

    /// Output names of the whole chain, base members first.
    pub fn member_names(&self) -> &[String] {
        &self.member_names
    }

    /// Output name at flattened position `index`.
    pub fn member_name(&self, index: usize) -> Result<&str> {
        self.member_names
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| ContractError::MemberIndexOutOfRange {
                contract: self.stable_name.to_string(),
                index,
            })
    }

    /// Namespace to declare on the member element at flattened position `index`.
    pub fn child_element_namespace(&self, index: usize) -> Option<&str> {
        self.child_element_namespaces
            .get(index)
            .and_then(|ns| ns.as_deref())
    }

    /// Number of members across the whole chain.
    pub fn total_member_count(&self) -> usize {
        self.member_names.len()
    }

    pub fn on_serializing(&self) -> Option<&LifecycleHook> {
        self.on_serializing.as_ref()
    }

    pub fn on_serialized(&self) -> Option<&LifecycleHook> {
        self.on_serialized.as_ref()
    }

    /// Iterates this contract followed by its ancestors, most derived first.
    pub fn chain(&self) -> impl Iterator<Item = &ClassContract> {
        std::iter::successors(Some(self), |c| c.base_contract().map(Arc::as_ref))
    }
}

/// Builds a [`ClassContract`], flattening the member layout and linking
/// same-named members across the inheritance chain.
#[derive(Debug)]
pub struct ClassContractBuilder {
    data_type: DataType,
    stable_name: QualifiedName,
    namespace: Option<String>,
    base_contract: Option<Arc<ClassContract>>,
    members: Vec<DataMember>,
    on_serializing: Option<LifecycleHook>,
    on_serialized: Option<LifecycleHook>,
}

impl ClassContractBuilder {
    pub fn new(data_type: DataType, stable_name: QualifiedName) -> Self {
        Self {
            data_type,
            stable_name,
            namespace: None,
            base_contract: None,
            members: Vec::new(),
            on_serializing: None,
            on_serialized: None,
        }
    }

    /// Member element namespace; defaults to the stable name's namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn base(mut self, base: Arc<ClassContract>) -> Self {
        self.base_contract = Some(base);
        self
    }

    pub fn member(mut self, member: DataMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn on_serializing(mut self, hook: LifecycleHook) -> Self {
        self.on_serializing = Some(hook);
        self
    }

    pub fn on_serialized(mut self, hook: LifecycleHook) -> Self {
        self.on_serialized = Some(hook);
        self
    }

    pub fn build(self) -> Result<ClassContract> {
        for (i, member) in self.members.iter().enumerate() {
            if self.members[..i].iter().any(|m| m.name() == member.name()) {
                return Err(ContractError::DuplicateMember {
                    contract: self.stable_name.to_string(),
                    member: member.name().to_string(),
                });
            }
        }

        let base = self.base_contract.as_deref();
        let stable_namespace = self.stable_name.namespace.as_str();
        let members: Vec<Arc<DataMember>> = self
            .members
            .into_iter()
            .map(|member| {
                if member.conflicting_member().is_some() {
                    return Arc::new(member);
                }
                match nearest_conflict(base, stable_namespace, member.name()) {
                    Some(conflict) => Arc::new(member.with_conflicting_member(conflict)),
                    None => Arc::new(member),
                }
            })
            .collect();

        let mut member_names = Vec::new();
        let mut child_element_namespaces = Vec::new();
        if let Some(base) = base {
            member_names.extend_from_slice(base.member_names());
            child_element_namespaces.extend_from_slice(&base.child_element_namespaces);
        }
        member_names.extend(members.iter().map(|m| m.name().to_string()));
        child_element_namespaces.extend(
            members
                .iter()
                .map(|m| m.child_namespace().map(str::to_string)),
        );

        Ok(ClassContract {
            namespace: self
                .namespace
                .unwrap_or_else(|| self.stable_name.namespace.clone()),
            data_type: self.data_type,
            stable_name: self.stable_name,
            members,
            base_contract: self.base_contract,
            member_names,
            child_element_namespaces,
            on_serializing: self.on_serializing,
            on_serialized: self.on_serialized,
        })
    }
}

/// Nearest ancestor member named `name` whose contract shares `namespace`.
fn nearest_conflict(
    base: Option<&ClassContract>,
    namespace: &str,
    name: &str,
) -> Option<Arc<DataMember>> {
    base?
        .chain()
        .filter(|ancestor| ancestor.stable_name().namespace == namespace)
        .find_map(|ancestor| ancestor.members().iter().find(|m| m.name() == name))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://example.com/model";

    fn int() -> DataType {
        DataType::Primitive(PrimitiveType::Int32)
    }

    fn string() -> DataType {
        DataType::Primitive(PrimitiveType::String)
    }

    fn base() -> Arc<ClassContract> {
        Arc::new(
            ClassContract::builder(DataType::Class("Base".into()), QualifiedName::new("Base", NS))
                .member(DataMember::new("Id", int()))
                .member(DataMember::new("X", int()).with_child_namespace("urn:child"))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_flattened_layout_is_base_first() {
        let derived = ClassContract::builder(
            DataType::Class("Derived".into()),
            QualifiedName::new("Derived", NS),
        )
        .base(base())
        .member(DataMember::new("Y", string()))
        .build()
        .unwrap();

        assert_eq!(derived.member_names(), ["Id", "X", "Y"]);
        assert_eq!(derived.member_name(2), Ok("Y"));
        assert_eq!(
            derived.member_name(3),
            Err(ContractError::MemberIndexOutOfRange {
                contract: format!("{{{NS}}}Derived"),
                index: 3,
            })
        );
        assert_eq!(derived.total_member_count(), 3);
        assert_eq!(derived.child_element_namespace(1), Some("urn:child"));
        assert_eq!(derived.child_element_namespace(2), None);
        assert_eq!(derived.members().len(), 1);
        assert_eq!(derived.namespace(), NS);
        assert_eq!(derived.chain().count(), 2);
    }

    #[test]
    fn test_same_namespace_redeclaration_links_conflict() {
        let base = base();
        let derived = ClassContract::builder(
            DataType::Class("Derived".into()),
            QualifiedName::new("Derived", NS),
        )
        .base(base.clone())
        .member(DataMember::new("Id", string()))
        .build()
        .unwrap();

        let link = derived.members()[0].conflicting_member().unwrap();
        assert!(Arc::ptr_eq(link, &base.members()[0]));
        assert!(base.members()[0].conflicting_member().is_none());
    }

    #[test]
    fn test_other_namespace_redeclaration_is_not_linked() {
        let derived = ClassContract::builder(
            DataType::Class("Derived".into()),
            QualifiedName::new("Derived", "urn:other"),
        )
        .base(base())
        .member(DataMember::new("Id", string()))
        .build()
        .unwrap();

        assert!(derived.members()[0].conflicting_member().is_none());
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let result =
            ClassContract::builder(DataType::Class("Dup".into()), QualifiedName::new("Dup", NS))
                .member(DataMember::new("A", int()))
                .member(DataMember::new("A", string()))
                .build();
        assert!(matches!(result, Err(ContractError::DuplicateMember { .. })));
    }

    #[test]
    fn test_key_value_pair_contract() {
        let contract = ClassContract::key_value_pair(string(), int());
        assert_eq!(contract.stable_name().name, "KeyValuePairOfstringint");
        assert_eq!(contract.member_names(), ["key", "value"]);
        assert_eq!(contract.data_type(), &DataType::key_value_pair(string(), int()));

        let entry = ClassContract::dictionary_entry(string(), int(), NS);
        assert_eq!(entry.member_names(), ["Key", "Value"]);
        assert_eq!(entry.namespace(), NS);
    }
}
