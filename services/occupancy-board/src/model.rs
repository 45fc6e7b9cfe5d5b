//! Wire types returned by the occupancy backend

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Body of the status endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<StatusItem>>,
}

impl StatusPayload {
    /// Unwrap the facility list, turning `success: false` and missing
    /// `status` into payload errors
    pub fn into_items(self) -> crate::Result<Vec<StatusItem>> {
        if !self.success {
            return Err(crate::BoardError::Payload(failure_message(self.message)));
        }
        self.status.ok_or_else(|| {
            crate::BoardError::Payload("status payload has no `status` array".to_string())
        })
    }
}

/// One facility (or one sub-unit of a facility group)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusItem {
    pub name: String,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<StatusItem>>,
}

impl StatusItem {
    pub fn available(name: &str, used: u32, max: u32) -> Self {
        Self {
            name: name.to_string(),
            valid: true,
            used: Some(used),
            max: Some(max),
            details: None,
        }
    }

    pub fn out_of_service(name: &str) -> Self {
        Self {
            name: name.to_string(),
            valid: false,
            used: None,
            max: None,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<StatusItem>) -> Self {
        self.details = Some(details);
        self
    }
}

/// Body of the logs endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogPayload {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub graphs: Vec<GraphSeries>,
}

impl LogPayload {
    pub fn into_graphs(self) -> crate::Result<Vec<GraphSeries>> {
        if self.success {
            Ok(self.graphs)
        } else {
            Err(crate::BoardError::Payload(failure_message(self.message)))
        }
    }
}

/// A chart definition as produced by the backend. Fields the board does not
/// touch are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSeries {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: GraphData,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub data: Vec<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of the emergency endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyResponse {
    /// Mode after the toggle: `true` running, `false` stopped, `None` when the
    /// server could not read its own mode
    #[serde(default, deserialize_with = "flag_or_null")]
    pub valid: Option<bool>,
    pub action: String,
}

fn failure_message(message: Option<String>) -> String {
    message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "server reported failure without a message".to_string())
}

/// Accepts `true`/`false`, `1`/`0` or `null`
fn flag_or_null<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::Number(n)) => Ok(Some(n.as_i64().unwrap_or(0) != 0)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected boolean, 0/1 or null, got {}",
            other
        ))),
    }
}
