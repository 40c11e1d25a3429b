// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{ManifestError, Result};
use crate::models::RuleCode;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub lint: LintConfig,
    pub discovery: DiscoveryConfig,
    pub pipeline: PipelineConfig,
    pub imports: ImportsConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LintConfig {
    /// Enables the `unpinned` rule.
    pub require_pins: bool,
    /// Silences `unsupported-option` for pip option lines.
    pub allow_options: bool,
    /// Treat warnings as failures when computing the exit status.
    pub deny_warnings: bool,
    /// Rule codes (`E004`) or names (`duplicate-package`) to switch off.
    pub disabled_rules: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub patterns: Vec<String>,
    pub skip_patterns: Vec<String>,
    pub max_file_size_kb: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub parallel_workers: usize,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportsConfig {
    /// Extra `module = "distribution"` pairs, consulted before the built-in table.
    pub module_map: HashMap<String, String>,
    /// Top-level modules that are never reported.
    pub ignore_modules: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                "requirements*.txt".to_string(),
                "*-requirements.txt".to_string(),
                "requirements/*.txt".to_string(),
            ],
            skip_patterns: vec![
                ".git/".to_string(),
                ".venv/".to_string(),
                "venv/".to_string(),
                "node_modules/".to_string(),
                "target/".to_string(),
            ],
            max_file_size_kb: 512,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 4,
        }
    }
}

impl LintConfig {
    pub fn disabled(&self) -> Result<Vec<RuleCode>> {
        self.disabled_rules
            .iter()
            .map(|raw| raw.parse::<RuleCode>().map_err(ManifestError::Config))
            .collect()
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();
        Self::load_with_env(path, None)
    }

    /// `env` replaces the process environment as the `MANIFEST_LINT__*` source when given.
    fn load_with_env(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("MANIFEST_LINT")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("lint.disabled_rules")
                .with_list_parse_key("discovery.patterns")
                .with_list_parse_key("discovery.skip_patterns")
                .with_list_parse_key("imports.ignore_modules")
                .source(env),
        );

        let settings = builder
            .build()
            .map_err(|e| ManifestError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ManifestError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if self.pipeline.parallel_workers == 0 {
            return Err(ManifestError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.discovery.max_file_size_kb == 0 {
            return Err(ManifestError::Config(
                "max_file_size_kb must be greater than 0".to_string(),
            ));
        }

        if self.discovery.patterns.is_empty() {
            return Err(ManifestError::Config(
                "discovery.patterns must not be empty".to_string(),
            ));
        }

        self.lint.disabled()?;

        Ok(())
    }
}
