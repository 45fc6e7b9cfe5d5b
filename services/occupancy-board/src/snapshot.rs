//! Snapshot of the last rendered status payload

use serde_json::Value;

/// Holds the canonical serialization of the last payload applied to the view.
///
/// Only the string is kept, never the payload itself. `serde_json::Value`
/// objects keep their keys sorted, so two payloads that differ only in key
/// order compare equal; any other difference anywhere counts as a change.
#[derive(Debug, Default, Clone)]
pub struct SnapshotCache {
    last: Option<String>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_changed(&self, payload: &Value) -> bool {
        match &self.last {
            Some(last) => *last != canonical(payload),
            None => true,
        }
    }

    pub fn commit(&mut self, payload: &Value) {
        self.last = Some(canonical(payload));
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }
}

fn canonical(payload: &Value) -> String {
    payload.to_string()
}
