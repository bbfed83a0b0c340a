//! Connection descriptors and the file-backed connection store.
//!
//! A [`Connection`] names the model, endpoint, and credential needed to
//! address the completion service. Connections live as JSON files under the
//! user config directory; [`ConnectionStore`] creates the template file and
//! loads named connections from it.

use crate::error::{LlmError, LlmResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the connection used when the caller does not pick one.
pub const DEFAULT_CONNECTION: &str = "default";

const CONFIG_DIR_NAME: &str = "llm-bridge";
const CONNECTIONS_DIR_NAME: &str = "connections";

/// Connection descriptor for the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Model identifier, e.g. `gpt-4o` or `gemini/gemini-2.0-flash`.
    pub model: String,
    /// Endpoint base URL; trailing slashes are stripped on construction and
    /// tolerated by the transport.
    pub base_url: String,
    /// Credential for the completion service.
    pub api_key: String,
}

impl Connection {
    /// Create a connection, normalizing the base URL.
    pub fn new(
        model: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Validate that every field is filled in.
    pub fn validate(&self) -> LlmResult<()> {
        if self.model.trim().is_empty() {
            return Err(LlmError::configuration_error("connection model is empty"));
        }
        if self.base_url.trim().is_empty() {
            return Err(LlmError::configuration_error(
                "connection base URL is empty",
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(LlmError::configuration_error("connection API key is empty"));
        }
        Ok(())
    }
}

/// Optional generation parameters merged into the outbound request.
///
/// Unset fields are omitted from the request so the service applies its own
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub presence_penalty: Option<f64>,
    pub frequency_penalty: Option<f64>,
}

/// File-backed store of named connections.
///
/// Layout: `<root>/connections/<name>.json`, where `<root>` defaults to
/// `llm-bridge` under the platform config directory.
#[derive(Debug, Clone)]
pub struct ConnectionStore {
    root: PathBuf,
}

impl Default for ConnectionStore {
    fn default() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            root: base.join(CONFIG_DIR_NAME),
        }
    }
}

impl ConnectionStore {
    /// Store rooted at the platform config directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of a named connection file, creating the connections directory
    /// if needed.
    pub fn connection_path(&self, name: &str) -> LlmResult<PathBuf> {
        let dir = self.root.join(CONNECTIONS_DIR_NAME);
        std::fs::create_dir_all(&dir).map_err(|e| {
            LlmError::configuration_error(format!(
                "cannot create connections directory `{}`: {e}",
                dir.display()
            ))
        })?;
        Ok(dir.join(format!("{name}.json")))
    }

    /// Write an empty connection template and return its path.
    ///
    /// The user is expected to fill in the file before subsequent use.
    pub fn init_connection(&self, name: &str) -> LlmResult<PathBuf> {
        let path = self.connection_path(name)?;
        let template = Connection {
            model: String::new(),
            base_url: String::new(),
            api_key: String::new(),
        };
        let json = serde_json::to_string_pretty(&template).map_err(|e| {
            LlmError::configuration_error(format!("cannot serialize connection template: {e}"))
        })?;
        write_file(&path, &json)?;

        log_debug!(
            connection = name,
            path = %path.display(),
            "Connection template written"
        );
        Ok(path)
    }

    /// Load a named connection.
    ///
    /// Fails with [`LlmError::ConfigurationError`] when the file is missing,
    /// holds invalid JSON, or leaves required fields empty.
    pub fn load(&self, name: &str) -> LlmResult<Connection> {
        let path = self.connection_path(name)?;
        if !path.exists() {
            return Err(LlmError::configuration_error(format!(
                "connection `{name}` has no configuration file; run `config` to create {}",
                path.display()
            )));
        }

        let text = std::fs::read_to_string(&path).map_err(|e| {
            LlmError::configuration_error(format!(
                "cannot read connection file `{}`: {e}",
                path.display()
            ))
        })?;
        let raw: Connection = serde_json::from_str(&text).map_err(|e| {
            LlmError::configuration_error(format!(
                "connection `{name}` is not valid JSON (see `{}`): {e}",
                path.display()
            ))
        })?;

        let connection = Connection::new(raw.model, raw.base_url, raw.api_key);
        connection.validate()?;
        Ok(connection)
    }
}

fn write_file(path: &Path, contents: &str) -> LlmResult<()> {
    std::fs::write(path, contents).map_err(|e| {
        LlmError::configuration_error(format!("cannot write `{}`: {e}", path.display()))
    })
}
