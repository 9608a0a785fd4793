//! Keyword overlap: the always-available, ATS-style baseline match.
//!
//! Algorithm:
//! 1. Tokenize resume, JD and role title (lower-case, keep `[a-z0-9+.#/-]`,
//!    drop tokens of ≤ 2 chars and stop words). Token sets keep the order in
//!    which tokens first appear.
//! 2. overlap = |JD ∩ resume| / max(|JD|, 1) × 100
//! 3. bonus = 1.5 per role-title token found in the resume, capped at 10
//! 4. score = min(100, overlap + bonus)
//!
//! JD tokens missing from the resume but present in the role title are
//! reported as missing keywords.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "for", "with", "a", "an", "to", "of", "in", "on", "at", "by", "from",
    "as", "is", "are", "be", "this", "that", "it", "you", "your", "our",
];

const MIN_TOKEN_LEN: usize = 3;
pub const MAX_MISSING_KEYWORDS: usize = 25;
const ROLE_TOKEN_BONUS: f64 = 1.5;
const MAX_ROLE_BONUS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordOverlap {
    /// 0 – 100, unrounded.
    pub score: f64,
    pub missing_keywords: Vec<String>,
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '.' | '#' | '/' | '-')
}

/// Splits text into scoring tokens, duplicates included.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_token_char(c) || c.is_whitespace() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| w.len() >= MIN_TOKEN_LEN && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Unique tokens in order of first appearance.
fn token_set(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

pub fn keyword_overlap_score(resume_text: &str, jd_text: &str, role: Option<&str>) -> KeywordOverlap {
    let jd_tokens = token_set(jd_text);
    let resume_tokens: HashSet<String> = tokenize(resume_text).into_iter().collect();
    let role_tokens = token_set(role.unwrap_or_default());

    let mut match_count = 0usize;
    let mut missing_keywords = Vec::new();

    for token in &jd_tokens {
        if resume_tokens.contains(token) {
            match_count += 1;
        } else if role_tokens.contains(token) {
            missing_keywords.push(token.clone());
        }
    }

    let total = jd_tokens.len().max(1);
    let overlap_pct = match_count as f64 / total as f64 * 100.0;

    let role_hits = role_tokens
        .iter()
        .filter(|t| resume_tokens.contains(*t))
        .count();
    let bonus_pct = (role_hits as f64 * ROLE_TOKEN_BONUS).min(MAX_ROLE_BONUS);

    missing_keywords.truncate(MAX_MISSING_KEYWORDS);

    KeywordOverlap {
        score: (overlap_pct + bonus_pct).min(100.0),
        missing_keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_short_and_stop_words() {
        let tokens = tokenize("Looking for a Python developer with REST API experience");
        assert_eq!(
            tokens,
            vec!["looking", "python", "developer", "rest", "api", "experience"]
        );
    }

    #[test]
    fn test_tokenize_keeps_tech_punctuation() {
        let tokens = tokenize("C++, C#, node.js and CI/CD (front-end)!");
        assert_eq!(tokens, vec!["c++", "node.js", "ci/cd", "front-end"]);
    }

    #[test]
    fn test_tokenize_replaces_non_ascii() {
        assert_eq!(tokenize("café résumé"), vec!["caf", "sum"]);
    }

    #[test]
    fn test_python_rest_api_example() {
        let result = keyword_overlap_score(
            "python django rest api",
            "looking for python developer with rest api experience",
            None,
        );
        // JD tokens: looking, python, developer, rest, api, experience → 3/6 matched
        assert!((result.score - 50.0).abs() < 1e-9);
        assert!(result.score > 0.0 && result.score < 100.0);
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_role_title_supplies_missing_keywords() {
        let result = keyword_overlap_score(
            "python django rest api",
            "looking for python developer with rest api experience",
            Some("Python Developer Intern"),
        );
        assert_eq!(result.missing_keywords, vec!["developer"]);
        // 50% overlap + 1.5 bonus for "python"
        assert!((result.score - 51.5).abs() < 1e-9);
    }

    #[test]
    fn test_role_bonus_is_capped() {
        let role = "alpha beta gamma delta epsilon zeta eta1 theta iota kappa";
        let resume = role;
        let result = keyword_overlap_score(resume, "unrelated words here", Some(role));
        // No JD overlap, 10 role hits × 1.5 = 15 → capped at 10
        assert!((result.score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_capped_at_100() {
        let text = "rust tokio axum serde";
        let result = keyword_overlap_score(text, text, Some("rust tokio"));
        assert!((result.score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_jd_scores_zero() {
        let result = keyword_overlap_score("rust developer", "", None);
        assert_eq!(result.score, 0.0);
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_missing_keywords_truncated_in_discovery_order() {
        let words: Vec<String> = (0..40).map(|i| format!("skill{i:02}")).collect();
        let jd = words.join(" ");
        let result = keyword_overlap_score("nothing relevant", &jd, Some(&jd));
        assert_eq!(result.missing_keywords.len(), MAX_MISSING_KEYWORDS);
        assert_eq!(result.missing_keywords[0], "skill00");
        assert_eq!(result.missing_keywords[24], "skill24");
    }

    #[test]
    fn test_duplicate_jd_tokens_counted_once() {
        let result = keyword_overlap_score("rust", "rust rust rust golang", None);
        assert!((result.score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let resume = "Built REST services in Go and Python; deployed on Kubernetes";
        let jd = "Backend intern: Go, Kubernetes, Terraform, PostgreSQL, gRPC";
        let role = Some("Backend Engineering Intern");
        let first = keyword_overlap_score(resume, jd, role);
        let second = keyword_overlap_score(resume, jd, role);
        assert_eq!(first, second);
    }
}
