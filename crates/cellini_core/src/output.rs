//! Output types from language-model responses.

use serde::{Deserialize, Serialize};

/// Supported output types from language models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output, for drivers that decode JSON mode natively.
    Json(serde_json::Value),
}
