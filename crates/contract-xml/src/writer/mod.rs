//! The contract-driven write path.
//!
//! [`write_class`] and [`write_collection`] write the content of an element
//! the caller has already opened. Nested values go back through
//! [`WriteContext::internal_serialize_reference`], which picks the contract
//! of the runtime type and calls into this module again.

mod adapter;
mod collection;
mod conflict;
pub(crate) mod element;
mod lifecycle;
mod members;
mod value;

use helios_contract::{ClassContract, Value};
use tracing::debug;

use crate::context::WriteContext;
use crate::error::Result;
use crate::sink::XmlSink;

pub use collection::write_collection;
pub use conflict::has_conflict;
pub use members::write_members;
pub use value::{ValuePlan, plan_value, write_value};

/// Writes the members of a class-contract-described value.
///
/// Pre-serialize hooks run on a private copy of `value` before any member is
/// read; the caller's value is never touched.
pub fn write_class<S, C>(
    sink: &mut S,
    value: &Value,
    context: &mut C,
    contract: &ClassContract,
) -> Result<()>
where
    S: XmlSink + ?Sized,
    C: WriteContext,
{
    debug!(contract = %contract.stable_name(), "writing class");
    let streaming = context.streaming_context();
    let mut value = value.clone();
    lifecycle::invoke_on_serializing(&mut value, contract, &streaming)?;
    let mut value = adapter::resolve_adapter(value, contract)?;
    write_members(sink, &value, context, contract, contract, 0)?;
    lifecycle::invoke_on_serialized(&mut value, contract, &streaming)
}
