// src/similarity.rs
//! Comparison primitives shared by every source's relevance filter.
//!
//! Similarity: `strsim::normalized_levenshtein` (returns f64 -> percent).
//! The 60/80 thresholds are tunable policy knobs, configured per source.

use strsim::normalized_levenshtein;

pub const DEFAULT_TITLE_THRESHOLD: u32 = 60;
pub const DEFAULT_PARTIAL_SKILL_THRESHOLD: u32 = 80;
pub const DEFAULT_MIN_SKILL_MATCHES: usize = 2;

/// Fuzzy similarity of two strings as a percentage in 0..=100.
pub fn similarity_pct(a: &str, b: &str) -> u32 {
    if a.is_empty() && b.is_empty() {
        return 100;
    }
    (normalized_levenshtein(a, b) * 100.0).round() as u32
}

/// True if one string contains the other (case-insensitive) or their fuzzy
/// similarity reaches `threshold`. Symmetric in its first two arguments.
pub fn title_matches(candidate: &str, desired: &str, threshold: u32) -> bool {
    let a = candidate.trim().to_lowercase();
    let b = desired.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.contains(&b) || b.contains(&a) {
        return true;
    }
    similarity_pct(&a, &b) >= threshold
}

/// Title gate as the filter step applies it: an empty desired position means
/// "no filter", never "no match".
pub fn title_gate(candidate: &str, desired: &str, threshold: u32) -> bool {
    if desired.trim().is_empty() {
        return true;
    }
    title_matches(candidate, desired, threshold)
}

/// True when at least `min_matches` user skills appear among the posting
/// tags. A skill counts once: either as an exact normalized match or as one
/// partial match (substring either way, or similarity >= `partial_threshold`).
/// Either side empty can never satisfy a minimum, so the answer is false.
pub fn sufficient_skill_overlap(
    tags: &[String],
    skills: &[String],
    min_matches: usize,
    partial_threshold: u32,
) -> bool {
    let tags = normalize_terms(tags);
    let skills = normalize_terms(skills);
    if tags.is_empty() || skills.is_empty() {
        return false;
    }
    if min_matches == 0 {
        return true;
    }

    let mut matched = 0usize;
    for skill in &skills {
        let hit = tags.iter().any(|tag| {
            tag == skill
                || tag.contains(skill.as_str())
                || skill.contains(tag.as_str())
                || similarity_pct(tag, skill) >= partial_threshold
        });
        if hit {
            matched += 1;
            if matched >= min_matches {
                return true;
            }
        }
    }
    false
}

/// Lowercase, trim, drop empties, dedup while keeping first-seen order.
fn normalize_terms(terms: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(terms.len());
    for t in terms {
        let t = t.trim().to_lowercase();
        if !t.is_empty() && seen.insert(t.clone()) {
            out.push(t);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn substring_containment_matches_either_direction() {
        assert!(title_matches("Senior Backend Developer", "backend developer", 60));
        assert!(title_matches("backend", "Senior Backend Developer (Rust)", 60));
    }

    #[test]
    fn close_titles_match_on_similarity() {
        assert!(title_matches("Backend Develoepr", "Backend Developer", 60));
        assert!(!title_matches("Accountant", "Backend Developer", 60));
    }

    #[test]
    fn title_match_is_symmetric() {
        let pairs = [
            ("Backend Developer", "Developer"),
            ("Data Engineer", "engineer data"),
            ("", "anything"),
            ("Designer", "Backend Developer"),
        ];
        for (a, b) in pairs {
            for t in [0u32, 40, 60, 95] {
                assert_eq!(
                    title_matches(a, b, t),
                    title_matches(b, a, t),
                    "asymmetric for ({a:?}, {b:?}, {t})"
                );
            }
        }
    }

    #[test]
    fn empty_desired_position_disables_the_gate() {
        assert!(title_gate("Anything At All", "", 60));
        assert!(title_gate("Anything At All", "   ", 99));
        // but title_matches itself reports no match on empty input
        assert!(!title_matches("Anything At All", "", 0));
    }

    #[test]
    fn exact_overlap_reaches_minimum() {
        let tags = v(&["Python", "Django", "AWS"]);
        let skills = v(&["python", " django "]);
        assert!(sufficient_skill_overlap(&tags, &skills, 2, 80));
    }

    #[test]
    fn partial_matches_fill_the_gap() {
        // "postgres" vs "postgresql" is a substring hit; "reactjs" vs "react"
        // likewise. Neither is an exact intersection.
        let tags = v(&["PostgreSQL", "ReactJS"]);
        let skills = v(&["postgres", "react"]);
        assert!(sufficient_skill_overlap(&tags, &skills, 2, 80));
    }

    #[test]
    fn one_skill_is_counted_once() {
        // A single user skill matching one tag exactly and another partially
        // must not satisfy a minimum of two.
        let tags = v(&["python", "python3"]);
        let skills = v(&["python"]);
        assert!(!sufficient_skill_overlap(&tags, &skills, 2, 80));
    }

    #[test]
    fn duplicate_skills_are_not_double_counted() {
        let tags = v(&["python", "django"]);
        let skills = v(&["python", "Python", " PYTHON "]);
        assert!(!sufficient_skill_overlap(&tags, &skills, 2, 80));
    }

    #[test]
    fn empty_sides_never_satisfy_a_minimum() {
        assert!(!sufficient_skill_overlap(&[], &v(&["python"]), 1, 80));
        assert!(!sufficient_skill_overlap(&v(&["python"]), &[], 1, 80));
        assert!(!sufficient_skill_overlap(&[], &[], 0, 80));
    }

    #[test]
    fn overlap_is_monotonic_in_added_skills() {
        let tags = v(&["python", "django", "sql", "docker"]);
        let mut skills = v(&["python"]);
        let mut prev = sufficient_skill_overlap(&tags, &skills, 2, 80);
        for extra in ["django", "sql", "docker"] {
            skills.push(extra.to_string());
            let now = sufficient_skill_overlap(&tags, &skills, 2, 80);
            assert!(now || !prev, "adding {extra} decreased the result");
            prev = now;
        }
        assert!(prev);
    }

    #[test]
    fn similarity_pct_bounds() {
        assert_eq!(similarity_pct("", ""), 100);
        assert_eq!(similarity_pct("abc", "abc"), 100);
        assert_eq!(similarity_pct("abc", ""), 0);
        let p = similarity_pct("backend developer", "backend develoepr");
        assert!((80..100).contains(&p), "got {p}");
    }
}
