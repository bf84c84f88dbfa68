//! # Configuration Module
//!
//! Document metadata and registrar defaults, loadable from YAML or JSON.
//!
//! ## Overview
//!
//! - [`DocumentInfo`] - `openapi` version, `info.title`, `info.version`, `info.description`
//! - [`RegistrarOptions`] - media types a bare schema is published under
//!
//! Both default sensibly, so a config file only names what it changes:
//!
//! ```yaml
//! document:
//!   title: Pet Store
//!   version: 2.1.0
//! options:
//!   response_media_types: [application/json, application/xml]
//! ```
//!
//! ## Environment Variables
//!
//! ### `ROUTESPEC_CONFIG`
//!
//! Path of a config file read by [`RegistrarConfig::from_env`]. When unset the defaults
//! are used.
//!
//! ## Usage
//!
//! ```rust
//! use routespec::config::RegistrarConfig;
//!
//! let config = RegistrarConfig::default();
//! assert_eq!(config.document.title, "My API");
//! assert_eq!(config.options.request_media_types, vec!["application/json"]);
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::info;

pub const CONFIG_ENV: &str = "ROUTESPEC_CONFIG";

fn default_openapi() -> String {
    "3.0.0".to_string()
}

fn default_title() -> String {
    "My API".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_media_types() -> Vec<String> {
    vec!["application/json".to_string()]
}

/// Top-level metadata of the generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    #[serde(default = "default_openapi")]
    pub openapi: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            openapi: default_openapi(),
            title: default_title(),
            version: default_version(),
            description: None,
        }
    }
}

impl DocumentInfo {
    #[must_use]
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Media types a bare or tuple schema expands to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrarOptions {
    #[serde(default = "default_media_types")]
    pub request_media_types: Vec<String>,
    #[serde(default = "default_media_types")]
    pub response_media_types: Vec<String>,
}

impl Default for RegistrarOptions {
    fn default() -> Self {
        Self {
            request_media_types: default_media_types(),
            response_media_types: default_media_types(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrarConfig {
    #[serde(default)]
    pub document: DocumentInfo,
    #[serde(default)]
    pub options: RegistrarOptions,
}

impl RegistrarConfig {
    /// Load from the file named by `ROUTESPEC_CONFIG`, or defaults when unset.
    ///
    /// # Errors
    ///
    /// See [`load_config`].
    pub fn from_env() -> Result<Self> {
        match env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => load_config(path.trim()),
            _ => Ok(Self::default()),
        }
    }
}

/// Load a [`RegistrarConfig`] from a `.json` file, or YAML for any other extension.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read and a JSON/YAML error if it does not
/// parse.
pub fn load_config(path: impl AsRef<Path>) -> Result<RegistrarConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let config: RegistrarConfig = if is_json {
        serde_json::from_str(&raw)?
    } else {
        serde_yaml::from_str(&raw)?
    };
    info!(
        path = %path.display(),
        title = %config.document.title,
        version = %config.document.version,
        "Loaded registrar config"
    );
    Ok(config)
}
