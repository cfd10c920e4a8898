//! Folding of patch operations into the aggregated state.
//!
//! The event pipeline never inspects the state document itself; it hands the
//! current value and the decoded operations to a [`StateReducer`] and keeps
//! whatever comes back.

use crate::core::error::ReduceError;
use json_patch::PatchOperation;
use serde_json::Value;

/// Pure fold of `(state, operations) -> next state`.
///
/// Implementations must not mutate shared data; the previous state is only
/// borrowed and a fresh document is returned on success.
pub trait StateReducer: Send + Sync {
    fn reduce(&self, state: Option<&Value>, operations: &[Value]) -> Result<Value, ReduceError>;
}

impl<F> StateReducer for F
where
    F: Fn(Option<&Value>, &[Value]) -> Result<Value, ReduceError> + Send + Sync,
{
    fn reduce(&self, state: Option<&Value>, operations: &[Value]) -> Result<Value, ReduceError> {
        self(state, operations)
    }
}

/// RFC 6902 reducer. An unset state starts out as `null`, so the first patch
/// usually replaces the document root.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPatchReducer;

impl StateReducer for JsonPatchReducer {
    fn reduce(&self, state: Option<&Value>, operations: &[Value]) -> Result<Value, ReduceError> {
        let ops = operations
            .iter()
            .enumerate()
            .map(|(index, op)| {
                serde_json::from_value::<PatchOperation>(op.clone()).map_err(|err| {
                    ReduceError::InvalidOperation {
                        index,
                        message: err.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut doc = state.cloned().unwrap_or(Value::Null);
        json_patch::patch(&mut doc, &ops).map_err(|err| ReduceError::Apply(err.to_string()))?;
        Ok(doc)
    }
}
