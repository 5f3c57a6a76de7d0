//! Configuration loading
//!
//! Defaults, then the optional TOML file, then command line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ads_registry_core::{CoreError, CoreResult, VerifierConfig};
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::adapters::HttpAuthorityLookup;
use crate::cli::Cli;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Registry file, read and rewritten in place
    pub file: PathBuf,
    pub log_level: String,
    pub verification: VerificationSettings,
}

/// `[verification]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationSettings {
    pub enabled: bool,
    pub lookup_url: String,
    pub max_concurrency: usize,
    pub max_retries: u32,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("app-ads.txt"),
            log_level: "info".to_string(),
            verification: VerificationSettings::default(),
        }
    }
}

impl Default for VerificationSettings {
    fn default() -> Self {
        let engine = VerifierConfig::default();
        Self {
            enabled: true,
            lookup_url: HttpAuthorityLookup::DEFAULT_LOOKUP_URL.to_string(),
            max_concurrency: engine.max_concurrency,
            max_retries: engine.max_retries,
            request_timeout_secs: engine.request_timeout.as_secs(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command line overrides
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref file) = cli.file {
            self.file.clone_from(file);
        }
        if let Some(ref level) = cli.log_level {
            self.log_level.clone_from(level);
        }
        let verification = &mut self.verification;
        if let Some(ref url) = cli.lookup_url {
            verification.lookup_url.clone_from(url);
        }
        if let Some(n) = cli.max_concurrency {
            verification.max_concurrency = n;
        }
        if let Some(n) = cli.max_retries {
            verification.max_retries = n;
        }
        if let Some(secs) = cli.timeout_secs {
            verification.request_timeout_secs = secs;
        }
        if cli.skip_verification {
            verification.enabled = false;
        }
    }

    /// Engine settings, validated
    pub fn verifier_config(&self) -> CoreResult<VerifierConfig> {
        let config = VerifierConfig {
            max_concurrency: self.verification.max_concurrency,
            max_retries: self.verification.max_retries,
            request_timeout: Duration::from_secs(self.verification.request_timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.file.as_os_str().is_empty() {
            return Err(CoreError::InvalidConfig(
                "registry file path is empty".to_string(),
            ));
        }
        if self.verification.enabled {
            self.verifier_config()?;
            crate::adapters::parse_lookup_url(&self.verification.lookup_url)?;
        }
        Ok(())
    }
}
