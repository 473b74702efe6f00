//! Access credential: the bearer token type and its durable store.
//!
//! The raw text is kept in a dedicated file in the config directory with restrictive
//! permissions (0o600 on Unix). It is written on every edit of the credential field and
//! read back once at startup.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::core::paths;

/// File name of the stored credential inside the config directory.
const CREDENTIAL_FILE: &str = "api-key";

/// A non-empty bearer token. Endpoint calls take `&Credential`, so an empty
/// credential can never reach the network.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap `text` as a credential. Returns `None` for the empty string.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() { None } else { Some(Self(text)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Errors when storing the credential.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("No config directory available")]
    NoConfigDir,
    #[error("Failed to store API key: {0}")]
    Io(#[from] io::Error),
}

/// Durable key-value persistence for the credential text.
pub trait CredentialStore {
    /// Previously stored text. `None` when absent, empty, or unreadable.
    fn load(&self) -> Option<String>;
    /// Replace the stored text with `text` (may be empty).
    fn store(&self, text: &str) -> Result<(), CredentialError>;
}

/// File-backed store: one file holding the raw credential text.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: Option<PathBuf>,
}

impl FileCredentialStore {
    #[cfg(test)]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store at `<config dir>/api-key`. Without a config directory nothing is persisted.
    pub fn in_config_dir() -> Self {
        Self {
            path: credentials_path(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<String> {
        let content = fs::read_to_string(self.path.as_ref()?).ok()?;
        // Tolerate a trailing newline from hand-edited files; keep everything else verbatim.
        let text = content.trim_end_matches(['\r', '\n']);
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    fn store(&self, text: &str) -> Result<(), CredentialError> {
        let path = self.path.as_ref().ok_or(CredentialError::NoConfigDir)?;
        let dir = path.parent().ok_or_else(|| {
            CredentialError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Invalid credentials path",
            ))
        })?;
        fs::create_dir_all(dir)?;

        let mut file = fs::File::create(path)?;
        file.write_all(text.as_bytes())?;

        #[cfg(unix)]
        {
            let mut perms = file.metadata()?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }
}

/// Path to the credential file in the config directory.
pub fn credentials_path() -> Option<PathBuf> {
    paths::config_dir().map(|d| d.join(CREDENTIAL_FILE))
}

/// In-memory store shared between clones; stands in for the file in view tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    value: std::sync::Arc<std::sync::Mutex<Option<String>>>,
    writes: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

#[cfg(test)]
impl MemoryCredentialStore {
    pub fn with_value(text: &str) -> Self {
        let store = Self::default();
        *store.value.lock().unwrap() = Some(text.to_string());
        store
    }

    pub fn raw(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<String> {
        self.raw().filter(|s| !s.is_empty())
    }

    fn store(&self, text: &str) -> Result<(), CredentialError> {
        *self.value.lock().unwrap() = Some(text.to_string());
        self.writes
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}
