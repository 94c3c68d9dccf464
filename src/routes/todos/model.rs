use serde::Serialize;
use serde_json::{Map, Value};

/// A todo record. `extra` carries whatever additional fields the caller
/// sent at creation, serialized inline next to the required three.
#[derive(Debug, Clone, Serialize)]
pub struct Todo {
    pub id: u64,
    pub task: String,
    pub completed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
