//! Request and response shapes for the model endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Context size choices offered for a load. `None` leaves it to the server.
pub const CONTEXT_SIZES: &[Option<u32>] = &[
    None,
    Some(2048),
    Some(4096),
    Some(8192),
    Some(16384),
    Some(32768),
];

/// Quantization of the model's key-value cache.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum CacheMode {
    #[default]
    Q4,
    Q6,
    Q8,
}

impl CacheMode {
    pub const ALL: [CacheMode; 3] = [CacheMode::Q4, CacheMode::Q6, CacheMode::Q8];

    pub fn as_str(self) -> &'static str {
        match self {
            CacheMode::Q4 => "Q4",
            CacheMode::Q6 => "Q6",
            CacheMode::Q8 => "Q8",
        }
    }
}

impl std::fmt::Display for CacheMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /model/load`.
///
/// `cache_size` always mirrors `max_seq_len`; both are omitted when unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadRequest {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_seq_len: Option<u32>,
    cache_mode: CacheMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    cache_size: Option<u32>,
}

impl LoadRequest {
    pub fn new(name: impl Into<String>, max_seq_len: Option<u32>, cache_mode: CacheMode) -> Self {
        Self {
            name: name.into(),
            max_seq_len,
            cache_mode,
            cache_size: max_seq_len,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A model the endpoint can serve. Only the identifier is used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
}

impl ModelDescriptor {
    /// Models from a `/model/list` body. `None` when `data` is absent or not an array.
    /// Entries without a string `id` are skipped.
    pub fn from_listing(body: &Value) -> Option<Vec<ModelDescriptor>> {
        let entries = body.get("data")?.as_array()?;
        let models = entries
            .iter()
            .filter_map(|entry| match ModelDescriptor::deserialize(entry) {
                Ok(model) => Some(model),
                Err(e) => {
                    log::warn!("Skipping malformed model entry {}: {}", entry, e);
                    None
                }
            })
            .collect();
        Some(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cache_size_mirrors_max_seq_len() {
        for &size in CONTEXT_SIZES {
            for mode in CacheMode::ALL {
                let body = serde_json::to_value(LoadRequest::new("m", size, mode)).unwrap();
                assert_eq!(body.get("cache_size"), body.get("max_seq_len"));
                assert_eq!(body["cache_mode"], json!(mode.as_str()));
            }
        }
    }

    #[test]
    fn unspecified_length_is_omitted() {
        let body = serde_json::to_value(LoadRequest::new("llama-7b", None, CacheMode::Q4)).unwrap();
        assert_eq!(body, json!({"name": "llama-7b", "cache_mode": "Q4"}));
    }

    #[test]
    fn specified_length_is_sent_twice() {
        let body =
            serde_json::to_value(LoadRequest::new("llama-7b", Some(4096), CacheMode::Q8)).unwrap();
        assert_eq!(
            body,
            json!({"name": "llama-7b", "max_seq_len": 4096, "cache_mode": "Q8", "cache_size": 4096})
        );
    }

    #[test]
    fn listing_keeps_order() {
        let body = json!({"data": [{"id": "llama-7b"}, {"id": "mistral-7b", "owned_by": "me"}]});
        let ids: Vec<String> = ModelDescriptor::from_listing(&body)
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["llama-7b", "mistral-7b"]);
    }

    #[test]
    fn listing_without_array_is_none() {
        assert!(ModelDescriptor::from_listing(&json!({})).is_none());
        assert!(ModelDescriptor::from_listing(&json!({"data": "nope"})).is_none());
        assert!(ModelDescriptor::from_listing(&json!([1, 2])).is_none());
    }

    #[test]
    fn listing_skips_entries_without_id() {
        let body = json!({"data": [{"id": "a"}, {"name": "b"}, 3, {"id": 4}]});
        let models = ModelDescriptor::from_listing(&body).unwrap();
        assert_eq!(models, vec![ModelDescriptor { id: "a".into() }]);
    }

    #[test]
    fn empty_listing_is_some() {
        assert_eq!(
            ModelDescriptor::from_listing(&json!({"data": []})),
            Some(vec![])
        );
    }
}
