// src/sources/arbeitnow.rs
//! Arbeitnow adapter. Payload shape: `{"data": [{title, company_name,
//! description, location, tags, job_types, url, created_at}]}`.
//! `created_at` is unix seconds.

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::SourceConfig;
use crate::normalize;
use crate::sources;
use crate::types::{fingerprint, JobSource, NormalizedPosting, RawPosting, UserProfile};

const NAME: &str = "arbeitnow";
const DEFAULT_URL: &str = "https://www.arbeitnow.com/api/job-board-api";

pub struct ArbeitnowSource {
    cfg: SourceConfig,
    client: reqwest::Client,
}

impl ArbeitnowSource {
    pub fn new(cfg: SourceConfig) -> Self {
        Self {
            cfg,
            client: reqwest::Client::new(),
        }
    }

    pub fn parse_response(body: &str) -> Result<Vec<RawPosting>> {
        #[derive(serde::Deserialize)]
        struct Payload {
            #[serde(default)]
            data: Vec<serde_json::Value>,
        }
        let payload: Payload = serde_json::from_str(body).context("arbeitnow: parsing json")?;
        Ok(payload
            .data
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::Object(m) => Some(m),
                _ => None,
            })
            .collect())
    }

    /// Arbeitnow splits skills over `tags` and `job_types`; both count.
    fn tags_of(posting: &RawPosting) -> Vec<String> {
        let mut tags = sources::string_list(posting, "tags");
        tags.extend(sources::string_list(posting, "job_types"));
        tags
    }
}

#[async_trait]
impl JobSource for ArbeitnowSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch_raw(&self) -> Result<Vec<RawPosting>> {
        sources::fetch_capped(NAME, &self.cfg, &self.client, DEFAULT_URL, Self::parse_response)
            .await
    }

    fn filter(&self, postings: Vec<RawPosting>, profile: &UserProfile) -> Vec<RawPosting> {
        postings
            .into_iter()
            .filter(|p| {
                let tags = Self::tags_of(p);
                sources::passes_profile(
                    sources::str_field(p, "title").unwrap_or_default(),
                    sources::str_field(p, "description").unwrap_or_default(),
                    &tags,
                    sources::str_field(p, "url"),
                    profile,
                    &self.cfg,
                )
            })
            .collect()
    }

    fn normalize(&self, posting: &RawPosting) -> Result<NormalizedPosting> {
        let title = sources::str_field(posting, "title")
            .unwrap_or_default()
            .trim()
            .to_string();
        let company = sources::str_field(posting, "company_name")
            .unwrap_or_default()
            .trim()
            .to_string();
        let url = sources::str_field(posting, "url")
            .unwrap_or_default()
            .trim()
            .to_string();
        let hash = fingerprint(NAME, &[&url]);
        NormalizedPosting {
            title,
            company,
            description: normalize::clean_html(
                sources::str_field(posting, "description").unwrap_or_default(),
            ),
            location: sources::opt_field(posting, "location"),
            tags: Self::tags_of(posting),
            url,
            source: NAME.to_string(),
            hash,
            published_at: sources::parse_published_at(posting.get("created_at")),
        }
        .ensure_required()
    }
}
