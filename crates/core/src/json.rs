use serde::Deserialize;
use serde_json::Value;

/// Accepted shapes of a patch-bearing `data` field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PatchPayload {
    Ops(Vec<Value>),
    Envelope { ops: Vec<Value> },
}

/// Decode the `data` of a payload message into its list of patch operations.
///
/// Both a bare JSON array and an object carrying the array under `ops` are accepted.
pub fn decode_patch_operations(data: &str) -> Result<Vec<Value>, serde_json::Error> {
    match serde_json::from_str::<PatchPayload>(data)? {
        PatchPayload::Ops(ops) | PatchPayload::Envelope { ops } => Ok(ops),
    }
}

/// Return a copy of `value` with every null-valued object field removed.
///
/// Null array elements are kept so indices stay stable.
pub fn without_null_fields(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), without_null_fields(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(without_null_fields).collect()),
        other => other.clone(),
    }
}
