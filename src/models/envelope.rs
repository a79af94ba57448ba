use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Envelope — `{ message, result }` wrapper around every response body
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    pub result: T,
}
