//! CLI-only commands: config info, key storage, and the list/load/unload workflows.
//!
//! These run without opening the TUI and produce plain text output.

use std::env;
use std::io::{self, Read};

use crate::core::config::Config;
use crate::core::credential::{self, Credential, CredentialStore, FileCredentialStore};
use crate::core::endpoint::{CacheMode, EndpointClient, LoadRequest, ModelDescriptor};
use crate::core::notice::{Notice, Severity};
use crate::core::paths;
use crate::core::workflow::{self, ListOutcome};

/// Env var holding an API key for CLI use (takes precedence over the stored key).
pub const API_KEY_ENV: &str = "TABBY_API_KEY";

/// Where the CLI credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeySource {
    Flag,
    Env,
    Stored,
}

impl KeySource {
    fn describe(self) -> &'static str {
        match self {
            KeySource::Flag => "from --api-key",
            KeySource::Env => "from TABBY_API_KEY",
            KeySource::Stored => "stored",
        }
    }
}

fn resolve_key(flag: Option<&str>, store: &dyn CredentialStore) -> Option<(String, KeySource)> {
    if let Some(k) = flag.filter(|k| !k.is_empty()) {
        return Some((k.to_string(), KeySource::Flag));
    }
    if let Ok(k) = env::var(API_KEY_ENV)
        && !k.is_empty()
    {
        return Some((k, KeySource::Env));
    }
    store.load().map(|k| (k, KeySource::Stored))
}

/// Resolve the credential for a CLI workflow: `--api-key`, then `TABBY_API_KEY`, then the stored key.
pub fn resolve_credential(flag: Option<&str>) -> Result<Credential, Notice> {
    let text = resolve_key(flag, &FileCredentialStore::in_config_dir())
        .map(|(k, _)| k)
        .unwrap_or_default();
    workflow::require_credential(&text)
}

/// Print a notice: success to stdout, anything else to stderr. Exits 1 on danger.
fn report(notice: &Notice) {
    match notice.severity {
        Severity::Success => println!("{}", notice.message),
        Severity::Warning => eprintln!("Warning: {}", notice.message),
        Severity::Danger => {
            eprintln!("Error: {}", notice.message);
            std::process::exit(1);
        }
    }
}

fn credential_or_exit(flag: Option<&str>) -> Credential {
    resolve_credential(flag).unwrap_or_else(|notice| {
        eprintln!("Error: {}", notice.message);
        std::process::exit(1);
    })
}

/// Run the `config` command: display paths, endpoint, and API key status.
pub fn run_config(config: &Config, api_key_flag: Option<&str>) {
    let config_dir = paths::config_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "—".to_string());
    let key_file = credential::credentials_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "—".to_string());
    let key_status = match resolve_key(api_key_flag, &FileCredentialStore::in_config_dir()) {
        Some((_, source)) => format!("set ✓ ({})", source.describe()),
        None => "not set".to_string(),
    };

    println!("Config:    {}", config_dir);
    println!("Key file:  {}", key_file);
    println!("Endpoint:  {}", config.base_url);
    println!("API key:   {}", key_status);
}

/// Run the `config set-api-key` command: store the API key in the config directory.
pub fn run_config_set_api_key(api_key: Option<String>) {
    let key = match api_key {
        Some(k) if !k.trim().is_empty() => k.trim().to_string(),
        _ => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            let trimmed = buf.trim().to_string();
            if trimmed.is_empty() {
                eprintln!("Error: no API key provided");
                std::process::exit(1);
            }
            trimmed
        }
    };

    let store = FileCredentialStore::in_config_dir();
    match store.store(&key) {
        Ok(()) => {
            let path = store
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "config directory".to_string());
            println!("API key saved to {}", path);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Render the model table printed by `models`.
fn format_models(models: &[ModelDescriptor]) -> String {
    let id_w = models
        .iter()
        .map(|m| m.id.chars().count())
        .max()
        .unwrap_or(20)
        .max(20);
    let mut out = format!("{:<3}  {:<id_w$}\n", "#", "ID");
    out.push_str(&format!("{}  {}\n", "-".repeat(3), "-".repeat(id_w)));
    for (i, m) in models.iter().enumerate() {
        out.push_str(&format!("{:<3}  {:<id_w$}\n", i + 1, m.id));
    }
    out.push_str(&format!("\n{} model(s) listed", models.len()));
    out
}

/// Run the `models` command: list the models the endpoint can serve.
pub async fn run_models(config: &Config, api_key_flag: Option<&str>) {
    let credential = credential_or_exit(api_key_flag);
    let client = EndpointClient::new(&config.base_url);
    let outcome = workflow::list(&client, &credential).await;
    if let ListOutcome::Listed(models) = &outcome {
        println!("{}", format_models(models));
    }
    report(&outcome.notice());
}

/// Run the `load` command.
pub async fn run_load(
    config: &Config,
    api_key_flag: Option<&str>,
    name: &str,
    max_seq_len: Option<u32>,
    cache_mode: CacheMode,
) {
    let credential = credential_or_exit(api_key_flag);
    let client = EndpointClient::new(&config.base_url);
    let request = LoadRequest::new(name, max_seq_len, cache_mode);
    report(&workflow::load(&client, &credential, &request).await);
}

/// Run the `unload` command.
pub async fn run_unload(config: &Config, api_key_flag: Option<&str>) {
    let credential = credential_or_exit(api_key_flag);
    let client = EndpointClient::new(&config.base_url);
    report(&workflow::unload(&client, &credential).await);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::credential::MemoryCredentialStore;

    #[test]
    fn flag_wins_over_stored_key() {
        let store = MemoryCredentialStore::with_value("sk-stored");
        let (key, source) = resolve_key(Some("sk-flag"), &store).unwrap();
        assert_eq!(key, "sk-flag");
        assert_eq!(source, KeySource::Flag);
    }

    #[test]
    fn empty_flag_is_ignored() {
        let store = MemoryCredentialStore::default();
        // TABBY_API_KEY may be set in the developer's shell; only assert when it is not.
        if env::var(API_KEY_ENV).is_err() {
            assert!(resolve_key(Some(""), &store).is_none());
        }
    }

    #[test]
    fn model_table_lists_every_id_in_order() {
        let models = vec![
            ModelDescriptor {
                id: "llama-7b".into(),
            },
            ModelDescriptor {
                id: "mistral-7b".into(),
            },
        ];
        let table = format_models(&models);
        let llama = table.find("llama-7b").unwrap();
        let mistral = table.find("mistral-7b").unwrap();
        assert!(llama < mistral);
        assert!(table.ends_with("2 model(s) listed"));
    }
}
