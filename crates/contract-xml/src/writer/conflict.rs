//! Decides whether a member needs an explicit `xsi:type`.

use std::ptr;
use std::sync::Arc;

use helios_contract::{ClassContract, DataMember};

/// Whether `member`, declared by `contract`, is ambiguous when written as
/// part of `derived_most`.
///
/// True when the member's conflict chain mixes declared types, or when a
/// contract between `derived_most` and `contract` in the same namespace
/// redeclares the name with a chain that mixes declared types.
pub fn has_conflict(
    member: &DataMember,
    contract: &ClassContract,
    derived_most: &ClassContract,
) -> bool {
    if conflicting_members_have_different_types(member) {
        return true;
    }

    let namespace = &contract.stable_name().namespace;
    let mut current = Some(derived_most);
    while let Some(candidate) = current {
        if ptr::eq(candidate, contract) {
            break;
        }
        if candidate.stable_name().namespace == *namespace {
            let shadowing = candidate
                .members()
                .iter()
                .find(|other| other.name() == member.name());
            if let Some(shadowing) = shadowing {
                return conflicting_members_have_different_types(shadowing);
            }
        }
        current = candidate.base_contract().map(Arc::as_ref);
    }
    false
}

fn conflicting_members_have_different_types(member: &DataMember) -> bool {
    let mut member = member;
    while let Some(next) = member.conflicting_member() {
        if member.member_type() != next.member_type() {
            return true;
        }
        member = next;
    }
    false
}
