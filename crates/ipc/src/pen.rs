//! Pen configuration selected by the host.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::IpcError;

/// Visual style of a stroke sample.
///
/// `kind` (serialized as `type`) selects the pen that renders the stroke;
/// every other field is passed through to that pen untouched. Two configs
/// are the same configuration when they compare equal field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenConfig {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl PenConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: Map::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Build a config from a host-supplied JSON object
    pub fn from_value(value: Value) -> Result<Self, IpcError> {
        let has_kind = value.get("type").is_some_and(Value::is_string);
        match value {
            Value::Object(_) if has_kind => Ok(serde_json::from_value(value)?),
            Value::Object(_) => Err(IpcError::InvalidFormat(
                "pen config needs a string \"type\" field".to_string(),
            )),
            other => Err(IpcError::InvalidFormat(format!(
                "pen config must be an object, got {other}"
            ))),
        }
    }
}
