//! Signal configuration types
//!
//! Hosts describe which resolver strategy to use and how signal strings are
//! split in a `[signal]` table of a package TOML file. Every key is optional.
//!
//! ```toml
//! [signal]
//! resolver = "container"
//! invoke_method = "invoke"
//! delimiter = "::"
//! ```

use crate::types::{Result, SignalError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for building a [`crate::Signal`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Name of the resolver strategy (see [`crate::SignalDelegate`])
    #[serde(default = "default_resolver")]
    pub resolver: String,

    /// Method called when a signal names no method
    #[serde(default = "default_invoke_method")]
    pub invoke_method: String,

    /// Separator between identifier and method
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_resolver() -> String {
    crate::delegate::CONTAINER_RESOLVER.to_string()
}

fn default_invoke_method() -> String {
    crate::resolver::DEFAULT_INVOKE_METHOD.to_string()
}

fn default_delimiter() -> String {
    crate::resolver::SIGNAL_DELIMITER.to_string()
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            resolver: default_resolver(),
            invoke_method: default_invoke_method(),
            delimiter: default_delimiter(),
        }
    }
}

/// Package file layout: only the `[signal]` table is read
#[derive(Debug, Default, Deserialize)]
struct PackageConfig {
    #[serde(default)]
    signal: SignalConfig,
}

impl SignalConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: select a resolver strategy by name
    pub fn with_resolver(mut self, resolver: impl Into<String>) -> Self {
        self.resolver = resolver.into();
        self
    }

    /// Builder method: set the default method name
    pub fn with_invoke_method(mut self, method: impl Into<String>) -> Self {
        self.invoke_method = method.into();
        self
    }

    /// Builder method: set the identifier/method separator
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Reject settings no resolver can work with
    pub fn validate(&self) -> Result<()> {
        if self.resolver.trim().is_empty() {
            return Err(SignalError::Config("resolver name is empty".to_string()));
        }
        if self.invoke_method.is_empty() {
            return Err(SignalError::Config("invoke_method is empty".to_string()));
        }
        if self.delimiter.is_empty() {
            return Err(SignalError::Config("delimiter is empty".to_string()));
        }
        Ok(())
    }

    /// Parse the `[signal]` table of a package TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let package: PackageConfig =
            toml::from_str(content).map_err(|e| SignalError::Config(e.to_string()))?;
        package.signal.validate()?;
        Ok(package.signal)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<SignalConfig> {
    log::debug!("Loading signal configuration from: {:?}", path);
    let content = fs::read_to_string(path)?;
    SignalConfig::from_toml_str(&content)
}
