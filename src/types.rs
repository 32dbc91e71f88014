// src/types.rs
use anyhow::{bail, Result};
use std::collections::BTreeMap;

/// Provider-specific posting as it arrives from the wire. Only the adapter
/// that fetched it knows which keys exist.
pub type RawPosting = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UserProfile {
    pub desired_position: String,
    pub skills: Vec<String>,
}

impl UserProfile {
    pub fn new(desired_position: impl Into<String>, skills: Vec<String>) -> Self {
        Self {
            desired_position: desired_position.into(),
            skills,
        }
    }

    /// Matching only runs when both the position and the skill list are set;
    /// an incomplete profile yields zero filtered results, not an error.
    pub fn is_complete(&self) -> bool {
        !self.desired_position.trim().is_empty() && !self.skills.is_empty()
    }
}

/// Canonical posting schema every adapter normalizes into.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedPosting {
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: Option<String>,
    pub tags: Vec<String>,
    pub url: String,
    pub source: String,
    pub hash: String,
    pub published_at: Option<i64>, // unix seconds, when the provider gives one
}

impl NormalizedPosting {
    /// A posting lacking a required field is dropped before persistence,
    /// never stored partially.
    pub fn ensure_required(self) -> Result<Self> {
        if self.title.trim().is_empty() {
            bail!("{}: posting has no title", self.source);
        }
        if self.company.trim().is_empty() {
            bail!("{}: posting has no company", self.source);
        }
        if self.url.trim().is_empty() {
            bail!("{}: posting has no url", self.source);
        }
        Ok(self)
    }
}

/// Deterministic content fingerprint, salted with the source name so two
/// providers listing the same title never collide on one hash.
pub fn fingerprint(source: &str, parts: &[&str]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    for p in parts {
        hasher.update([0x1f]);
        hasher.update(p.as_bytes());
    }
    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for b in digest.iter() {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Per-source result of one aggregate run. Built once, never mutated after.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FetchOutcome {
    pub success: bool,
    pub message: String,
    pub processed: usize,
}

impl FetchOutcome {
    pub fn succeeded(processed: usize, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            processed,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            processed: 0,
        }
    }
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct AggregateResult {
    pub per_source: BTreeMap<String, FetchOutcome>,
    pub total_processed: usize,
}

impl AggregateResult {
    /// True when every registered source failed — lets the caller distinguish
    /// "no provider reachable" from "no posting matched".
    pub fn all_failed(&self) -> bool {
        !self.per_source.is_empty() && self.per_source.values().all(|o| !o.success)
    }

    pub fn failed_sources(&self) -> Vec<&str> {
        self.per_source
            .iter()
            .filter(|(_, o)| !o.success)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// One external job-listing provider. Each implementation owns fetching,
/// profile filtering, and normalization for its own wire shape.
#[async_trait::async_trait]
pub trait JobSource: Send + Sync {
    /// Stable lowercase identifier; registry key and `source` field value.
    fn name(&self) -> &'static str;

    /// One bounded-timeout call against the provider. A disabled source
    /// returns `Ok(vec![])` without touching the network.
    async fn fetch_raw(&self) -> Result<Vec<RawPosting>>;

    /// Profile matching plus provider-specific quality gates. A posting
    /// failing any gate is excluded; no partial results.
    fn filter(&self, postings: Vec<RawPosting>, profile: &UserProfile) -> Vec<RawPosting>;

    /// Map provider fields into the canonical schema. `Err` means the posting
    /// is invalid and must be skipped, not that the run failed.
    fn normalize(&self, posting: &RawPosting) -> Result<NormalizedPosting>;
}
