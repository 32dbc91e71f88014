// src/store.rs
//! Dedup/persistence boundary: hash-keyed posting upserts plus per-user
//! match links. All adapters funnel through the same upsert, so identical
//! content never duplicates across runs.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use crate::types::NormalizedPosting;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

#[async_trait]
pub trait PostingStore: Send + Sync {
    /// Insert the posting if its hash is unseen, replace the stored copy
    /// otherwise.
    async fn upsert(&self, posting: &NormalizedPosting) -> Result<Upsert>;

    /// Associate a posting with a user's match list. Returns false when the
    /// (user, posting) pair already existed, so repeated runs stay idempotent.
    async fn link_user(&self, user_id: &str, hash: &str) -> Result<bool>;
}

/// In-memory reference store. Persistence technology is out of scope; this
/// keeps the dedup boundary real and testable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    postings: Mutex<HashMap<String, NormalizedPosting>>,
    links: Mutex<BTreeSet<(String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posting_count(&self) -> usize {
        self.postings.lock().expect("postings mutex poisoned").len()
    }

    pub fn get(&self, hash: &str) -> Option<NormalizedPosting> {
        self.postings
            .lock()
            .expect("postings mutex poisoned")
            .get(hash)
            .cloned()
    }

    pub fn links_for(&self, user_id: &str) -> Vec<String> {
        self.links
            .lock()
            .expect("links mutex poisoned")
            .iter()
            .filter(|(u, _)| u == user_id)
            .map(|(_, h)| h.clone())
            .collect()
    }
}

#[async_trait]
impl PostingStore for MemoryStore {
    async fn upsert(&self, posting: &NormalizedPosting) -> Result<Upsert> {
        let mut map = self.postings.lock().expect("postings mutex poisoned");
        let kind = if map.contains_key(&posting.hash) {
            Upsert::Updated
        } else {
            Upsert::Inserted
        };
        map.insert(posting.hash.clone(), posting.clone());
        Ok(kind)
    }

    async fn link_user(&self, user_id: &str, hash: &str) -> Result<bool> {
        let mut links = self.links.lock().expect("links mutex poisoned");
        Ok(links.insert((user_id.to_string(), hash.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fingerprint;

    fn posting(url: &str) -> NormalizedPosting {
        NormalizedPosting {
            title: "Backend Developer".into(),
            company: "Acme".into(),
            description: "desc".into(),
            location: None,
            tags: vec![],
            url: url.into(),
            source: "remotive".into(),
            hash: fingerprint("remotive", &[url]),
            published_at: None,
        }
    }

    #[tokio::test]
    async fn upsert_replaces_instead_of_duplicating() {
        let store = MemoryStore::new();
        let mut p = posting("https://example.test/1");

        assert_eq!(store.upsert(&p).await.unwrap(), Upsert::Inserted);
        p.title = "Senior Backend Developer".into();
        assert_eq!(store.upsert(&p).await.unwrap(), Upsert::Updated);

        assert_eq!(store.posting_count(), 1);
        assert_eq!(
            store.get(&p.hash).unwrap().title,
            "Senior Backend Developer"
        );
    }

    #[tokio::test]
    async fn user_links_are_idempotent_per_pair() {
        let store = MemoryStore::new();
        let p = posting("https://example.test/1");
        store.upsert(&p).await.unwrap();

        assert!(store.link_user("alice", &p.hash).await.unwrap());
        assert!(!store.link_user("alice", &p.hash).await.unwrap());
        assert!(store.link_user("bob", &p.hash).await.unwrap());

        assert_eq!(store.links_for("alice").len(), 1);
        assert_eq!(store.links_for("bob").len(), 1);
    }
}
