//! Writes the members of a class contract, ancestors first.

use helios_contract::{ClassContract, Value};
use tracing::trace;

use crate::context::WriteContext;
use crate::error::Result;
use crate::primitive::PrimitiveContract;
use crate::sink::XmlSink;
use crate::writer::{conflict, element, value};

/// Writes the members of `contract` and its ancestors as child elements.
///
/// `child_element_index` is the flattened position of the first member of
/// the chain rooted at `contract`. Returns the number of members written,
/// which is the total member count of the chain.
pub fn write_members<S, C>(
    sink: &mut S,
    value: &Value,
    context: &mut C,
    contract: &ClassContract,
    derived_most: &ClassContract,
    child_element_index: usize,
) -> Result<usize>
where
    S: XmlSink + ?Sized,
    C: WriteContext,
{
    let mut member_count = match contract.base_contract() {
        Some(base) => write_members(sink, value, context, base, derived_most, child_element_index)?,
        None => 0,
    };
    let child_element_index = child_element_index + member_count;
    let namespace = contract.namespace();

    for (i, member) in contract.members().iter().enumerate() {
        let index = child_element_index + i;
        context.increment_item_count(1)?;
        if member.is_get_only_collection() {
            context.store_is_get_only_collection();
        }
        let write_xsi_type = conflict::has_conflict(member, contract, derived_most);
        let member_value = member.get_value(value)?;
        let name = contract.member_name(index)?;
        trace!(member = name, index, write_xsi_type, "writing member");

        let primitive = PrimitiveContract::for_type(member.member_type())
            .filter(|primitive| !write_xsi_type && !primitive.is_object());
        match primitive {
            Some(primitive) => {
                primitive.write_element(sink, context, &member_value, name, namespace)?
            }
            None => {
                element::write_start_element(sink, member.member_type(), namespace, name)?;
                if let Some(child_namespace) = contract.child_element_namespace(index) {
                    sink.write_namespace_decl(child_namespace)?;
                }
                value::write_value(
                    sink,
                    context,
                    member.member_type(),
                    &member_value,
                    write_xsi_type,
                )?;
                element::write_end_element(sink)?;
            }
        }
        member_count += 1;
    }

    Ok(member_count)
}
