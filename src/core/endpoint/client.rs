//! HTTP client for the model management endpoints.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;

use crate::core::credential::Credential;

use super::error::EndpointError;
use super::types::LoadRequest;

const LIST_PATH: &str = "model/list";
const LOAD_PATH: &str = "model/load";
const UNLOAD_PATH: &str = "model/unload";

/// Client for one endpoint. Holds no credential: every call takes one explicitly.
#[derive(Debug, Clone)]
pub struct EndpointClient {
    http: Client,
    base_url: String,
}

impl EndpointClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/model/list`. Returns the parsed body.
    pub async fn list_models(&self, credential: &Credential) -> Result<Value, EndpointError> {
        let request = self.request(Method::GET, LIST_PATH, credential);
        send(request)
            .await
            .inspect_err(|e| log::error!("Error fetching models: {}", e))
    }

    /// `POST {base}/model/load` with `{name, max_seq_len, cache_mode, cache_size}`.
    pub async fn load_model(
        &self,
        credential: &Credential,
        load: &LoadRequest,
    ) -> Result<Value, EndpointError> {
        log::info!("Loading model {}", load.name());
        let request = self.request(Method::POST, LOAD_PATH, credential).json(load);
        send(request)
            .await
            .inspect_err(|e| log::error!("Error loading model {}: {}", load.name(), e))
    }

    /// `POST {base}/model/unload` with no body.
    pub async fn unload_model(&self, credential: &Credential) -> Result<Value, EndpointError> {
        let request = self.request(Method::POST, UNLOAD_PATH, credential);
        send(request)
            .await
            .inspect_err(|e| log::error!("Error unloading model: {}", e))
    }

    fn request(&self, method: Method, path: &str, credential: &Credential) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .bearer_auth(credential.as_str())
    }
}

/// Send once and parse the body as JSON. The HTTP status is left to the caller's
/// interpretation of the body.
async fn send(request: RequestBuilder) -> Result<Value, EndpointError> {
    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        log::debug!("Endpoint answered {}: {}", status, text);
    }
    Ok(serde_json::from_str(&text)?)
}
