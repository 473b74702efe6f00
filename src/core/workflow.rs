//! The three operator workflows (list, load, unload) and how each outcome is reported.
//!
//! Shared by the TUI orchestrator and the CLI subcommands. Every workflow makes at most
//! one endpoint call and maps its result to exactly one [`Notice`].

use serde_json::Value;

use crate::core::credential::Credential;
use crate::core::endpoint::{EndpointClient, LoadRequest, ModelDescriptor};
use crate::core::notice::Notice;

pub const MISSING_CREDENTIAL: &str = "Please enter an API key";
const UNKNOWN_ERROR: &str = "Unknown error";

/// Result of the list workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    /// The body carried a `data` array; render these models.
    Listed(Vec<ModelDescriptor>),
    /// No `data` array in the body. Existing models stay as they are.
    Empty,
    /// The call failed; carries the error message.
    Failed(String),
}

impl ListOutcome {
    pub fn notice(&self) -> Notice {
        match self {
            ListOutcome::Listed(_) => Notice::success("Models loaded successfully"),
            ListOutcome::Empty => Notice::warning("No models found"),
            ListOutcome::Failed(msg) => Notice::danger(format!("Error loading models: {}", msg)),
        }
    }
}

/// Credential precondition shared by every workflow: empty text never reaches the network.
pub fn require_credential(text: &str) -> Result<Credential, Notice> {
    Credential::new(text).ok_or_else(|| Notice::warning(MISSING_CREDENTIAL))
}

pub async fn list(client: &EndpointClient, credential: &Credential) -> ListOutcome {
    match client.list_models(credential).await {
        Ok(body) => match ModelDescriptor::from_listing(&body) {
            Some(models) => ListOutcome::Listed(models),
            None => ListOutcome::Empty,
        },
        Err(e) => ListOutcome::Failed(e.to_string()),
    }
}

pub async fn load(client: &EndpointClient, credential: &Credential, request: &LoadRequest) -> Notice {
    match client.load_model(credential, request).await {
        Ok(body) if is_success(&body) => {
            Notice::success(format!("Model {} loaded successfully", request.name()))
        }
        Ok(body) => Notice::danger(format!("Error loading model: {}", server_error(&body))),
        Err(e) => Notice::danger(format!("Error loading model: {}", e)),
    }
}

pub async fn unload(client: &EndpointClient, credential: &Credential) -> Notice {
    match client.unload_model(credential).await {
        Ok(body) if is_success(&body) => Notice::success("Model unloaded successfully"),
        Ok(body) => Notice::danger(format!("Error unloading model: {}", server_error(&body))),
        Err(e) => Notice::danger(format!("Error unloading model: {}", e)),
    }
}

fn is_success(body: &Value) -> bool {
    body.get("status").and_then(Value::as_str) == Some("success")
}

/// Server-supplied error text, or the generic fallback.
fn server_error(body: &Value) -> String {
    match body.get("error") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Null) | Some(Value::String(_)) | None => UNKNOWN_ERROR.to_string(),
        Some(other) => other.to_string(),
    }
}
