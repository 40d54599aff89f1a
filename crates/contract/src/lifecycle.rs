//! Lifecycle hook types attached to class contracts.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value::Value;

/// Describes the destination of a serialization, handed to every hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StreamingState {
    /// No particular destination.
    #[default]
    All,
    /// Written to persistent storage.
    Persistence,
    /// Sent to another process.
    CrossProcess,
    /// Sent to another machine.
    CrossMachine,
    /// Cloned in memory.
    Clone,
    /// Any other destination.
    Other,
}

/// Argument passed to lifecycle hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamingContext {
    pub state: StreamingState,
}

impl StreamingContext {
    pub fn new(state: StreamingState) -> Self {
        Self { state }
    }
}

type HookFn = dyn Fn(&mut Value, &StreamingContext) -> Result<()> + Send + Sync;

/// A pre- or post-serialize callback.
///
/// Hooks receive the in-flight value and may mutate it; the writer reads
/// members only after the pre-serialize hooks of the whole chain have run.
#[derive(Clone)]
pub struct LifecycleHook(Arc<HookFn>);

impl LifecycleHook {
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(&mut Value, &StreamingContext) -> Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(hook))
    }

    pub fn invoke(&self, value: &mut Value, context: &StreamingContext) -> Result<()> {
        (self.0)(value, context)
    }
}

impl fmt::Debug for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LifecycleHook")
    }
}
