// src/sources/mod.rs
//! Source adapters, one per external job-listing provider, plus the fetch
//! and filter plumbing they share. Normalization stays per-adapter because
//! the raw wire shapes are incompatible.

pub mod arbeitnow;
pub mod jobicy;
pub mod remotive;

pub use arbeitnow::ArbeitnowSource;
pub use jobicy::JobicySource;
pub use remotive::RemotiveSource;

use anyhow::{bail, Context, Result};
use metrics::{counter, describe_counter, describe_gauge};
use once_cell::sync::OnceCell;
use std::time::Duration;

use crate::config::SourceConfig;
use crate::similarity;
use crate::types::{RawPosting, UserProfile};

/// One-time metrics registration (so series show up on the host's exporter).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("jobs_fetched_total", "Raw postings fetched from providers.");
        describe_counter!(
            "jobs_kept_total",
            "Postings kept after filtering + normalization."
        );
        describe_counter!(
            "jobs_filtered_total",
            "Postings rejected by profile or quality gates."
        );
        describe_counter!("jobs_upserted_total", "Postings newly inserted into the store.");
        describe_counter!("jobs_source_errors_total", "Provider fetch/parse errors.");
        describe_gauge!(
            "jobs_pipeline_last_run_ts",
            "Unix ts when the aggregate pipeline last ran."
        );
    });
}

/// Shared HTTP fetch: honors the enabled flag, runs under the configured
/// timeout, and truncates to the configured result cap. The caller-supplied
/// `parse` turns the provider body into raw postings.
pub(crate) async fn fetch_capped(
    name: &'static str,
    cfg: &SourceConfig,
    client: &reqwest::Client,
    default_url: &str,
    parse: impl Fn(&str) -> Result<Vec<RawPosting>>,
) -> Result<Vec<RawPosting>> {
    ensure_metrics_described();

    if !cfg.enabled {
        tracing::info!(target: "sources", source = name, "source disabled, skipping fetch");
        return Ok(Vec::new());
    }

    let url = if cfg.api_url.is_empty() {
        default_url
    } else {
        cfg.api_url.as_str()
    };

    let resp = client
        .get(url)
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .send()
        .await
        .with_context(|| format!("{name}: http get"))?;
    let status = resp.status();
    if !status.is_success() {
        bail!("{name}: unexpected http status {status}");
    }
    let body = resp
        .text()
        .await
        .with_context(|| format!("{name}: reading body"))?;

    let mut raw = parse(&body)?;
    if raw.len() > cfg.max_results {
        raw.truncate(cfg.max_results);
    }
    counter!("jobs_fetched_total").increment(raw.len() as u64);
    Ok(raw)
}

/// Filter gate shared by all adapters: quality gates first (independent of
/// the profile), then title and skill matching. An incomplete profile keeps
/// nothing rather than erroring.
pub(crate) fn passes_profile(
    title: &str,
    description: &str,
    tags: &[String],
    url: Option<&str>,
    profile: &UserProfile,
    cfg: &SourceConfig,
) -> bool {
    let quality = &cfg.quality;

    if quality.require_valid_url && url.map_or(true, |u| u.trim().is_empty()) {
        return false;
    }
    if description.chars().count() < quality.min_description_length {
        return false;
    }
    if !quality.blacklisted_keywords.is_empty() {
        let haystack = format!("{title} {description}").to_lowercase();
        let blacklisted = quality
            .blacklisted_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .any(|k| haystack.contains(&k));
        if blacklisted {
            return false;
        }
    }

    if !profile.is_complete() {
        return false;
    }
    if !similarity::title_gate(
        title,
        &profile.desired_position,
        cfg.title_similarity_threshold,
    ) {
        return false;
    }
    similarity::sufficient_skill_overlap(
        tags,
        &profile.skills,
        cfg.min_skill_matches,
        cfg.partial_skill_threshold,
    )
}

/// String field of a raw posting, if present and a string.
pub(crate) fn str_field<'a>(p: &'a RawPosting, key: &str) -> Option<&'a str> {
    p.get(key).and_then(|v| v.as_str())
}

/// Array-of-strings field of a raw posting; missing or mistyped means empty.
pub(crate) fn string_list(p: &RawPosting, key: &str) -> Vec<String> {
    p.get(key)
        .and_then(|v| v.as_array())
        .map(|a| {
            a.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Optional non-empty trimmed string field.
pub(crate) fn opt_field(p: &RawPosting, key: &str) -> Option<String> {
    str_field(p, key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Provider publication dates arrive as unix seconds, RFC 3339, or a couple
/// of bare datetime layouts; anything else is treated as absent.
pub(crate) fn parse_published_at(v: Option<&serde_json::Value>) -> Option<i64> {
    let v = v?;
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    let s = v.as_str()?.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp());
        }
    }
    None
}
