//! Pre- and post-serialize hook invocation. Both walks run base-first.

use helios_contract::{ClassContract, StreamingContext, Value};

use crate::error::Result;

pub(crate) fn invoke_on_serializing(
    value: &mut Value,
    contract: &ClassContract,
    context: &StreamingContext,
) -> Result<()> {
    if let Some(base) = contract.base_contract() {
        invoke_on_serializing(value, base, context)?;
    }
    if let Some(hook) = contract.on_serializing() {
        hook.invoke(value, context)?;
    }
    Ok(())
}

pub(crate) fn invoke_on_serialized(
    value: &mut Value,
    contract: &ClassContract,
    context: &StreamingContext,
) -> Result<()> {
    if let Some(base) = contract.base_contract() {
        invoke_on_serialized(value, base, context)?;
    }
    if let Some(hook) = contract.on_serialized() {
        hook.invoke(value, context)?;
    }
    Ok(())
}
