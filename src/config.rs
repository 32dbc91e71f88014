// src/config.rs
//! Per-source configuration: endpoint, timeout, result cap, matching
//! thresholds, and quality gates. Loaded from TOML; every field defaults so a
//! bare `[sources.remotive]` table is a valid entry.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::similarity::{
    DEFAULT_MIN_SKILL_MATCHES, DEFAULT_PARTIAL_SKILL_THRESHOLD, DEFAULT_TITLE_THRESHOLD,
};

const ENV_PATH: &str = "JOB_SOURCES_CONFIG_PATH";
const DEFAULT_PATH: &str = "config/sources.toml";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RESULTS: usize = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sources: BTreeMap<String, SourceConfig>,
}

impl AppConfig {
    /// Load from an explicit TOML path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading source config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("parsing source config at {}", path.display()))
    }

    /// Load using env var + fallback:
    /// 1) $JOB_SOURCES_CONFIG_PATH
    /// 2) config/sources.toml
    /// 3) built-in defaults (empty source table)
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::from_path(&pb);
            }
            return Err(anyhow!("JOB_SOURCES_CONFIG_PATH points to non-existent path"));
        }
        let default = PathBuf::from(DEFAULT_PATH);
        if default.exists() {
            return Self::from_path(&default);
        }
        Ok(Self::default())
    }

    /// Config for one source; unknown names get the defaults.
    pub fn source(&self, name: &str) -> SourceConfig {
        self.sources.get(name).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub enabled: bool,
    /// Override endpoint; empty means the adapter's canonical URL.
    pub api_url: String,
    pub timeout_secs: u64,
    pub max_results: usize,
    pub min_skill_matches: usize,
    pub title_similarity_threshold: u32,
    pub partial_skill_threshold: u32,
    pub quality: QualityFilters,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_results: DEFAULT_MAX_RESULTS,
            min_skill_matches: DEFAULT_MIN_SKILL_MATCHES,
            title_similarity_threshold: DEFAULT_TITLE_THRESHOLD,
            partial_skill_threshold: DEFAULT_PARTIAL_SKILL_THRESHOLD,
            quality: QualityFilters::default(),
        }
    }
}

impl SourceConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Provider-configured gates applied independent of user-profile matching.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QualityFilters {
    pub blacklisted_keywords: Vec<String>,
    pub min_description_length: usize,
    pub require_valid_url: bool,
}

impl Default for QualityFilters {
    fn default() -> Self {
        Self {
            blacklisted_keywords: Vec::new(),
            min_description_length: 0,
            require_valid_url: true,
        }
    }
}
