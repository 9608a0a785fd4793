//! Resume ↔ job description matching.
//!
//! The keyword overlap is always computed and is the result of record. When an
//! `EmbeddingProvider` is available, the cosine similarity of both texts'
//! embeddings is blended in: `0.7 × semantic + 0.3 × keyword`. Any embedding
//! failure is logged and the keyword result is returned instead, so callers
//! never see an error from this module.

pub mod handlers;
pub mod keywords;
pub mod similarity;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::embedding_client::{EmbeddingError, EmbeddingProvider};
use crate::matching::keywords::{keyword_overlap_score, KeywordOverlap};
use crate::matching::similarity::cosine_similarity;

const SEMANTIC_WEIGHT: f64 = 0.7;
const KEYWORD_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMethod {
    #[serde(rename = "keywords")]
    Keywords,
    #[serde(rename = "semantic+keywords")]
    SemanticKeywords,
}

impl MatchMethod {
    pub fn label(self) -> &'static str {
        match self {
            MatchMethod::Keywords => "Keywords Only",
            MatchMethod::SemanticKeywords => "Semantic + Keywords",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// 0 – 100, rounded.
    pub score: u32,
    pub method: MatchMethod,
    /// Display name of `method`.
    pub method_label: String,
    /// Present only when the semantic path succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_score: Option<u32>,
    pub missing_keywords: Vec<String>,
    pub details: String,
}

/// Either a blended semantic outcome or the keyword-only fallback.
enum Outcome {
    Semantic { semantic: f64, model: String },
    KeywordsOnly { reason: &'static str },
}

fn round_score(score: f64) -> u32 {
    score.clamp(0.0, 100.0).round() as u32
}

impl Outcome {
    /// Total: every outcome produces a complete `MatchResult`.
    fn into_result(self, keywords: KeywordOverlap) -> MatchResult {
        match self {
            Outcome::Semantic { semantic, model } => {
                let model = model.rsplit('/').next().unwrap_or(&model);
                let combined = SEMANTIC_WEIGHT * semantic + KEYWORD_WEIGHT * keywords.score;
                MatchResult {
                    score: round_score(combined),
                    method: MatchMethod::SemanticKeywords,
                    method_label: MatchMethod::SemanticKeywords.label().to_string(),
                    semantic_score: Some(round_score(semantic)),
                    keyword_score: Some(round_score(keywords.score)),
                    missing_keywords: keywords.missing_keywords,
                    details: format!("Used HF embeddings ({model}) + keyword overlap."),
                }
            }
            Outcome::KeywordsOnly { reason } => MatchResult {
                score: round_score(keywords.score),
                method: MatchMethod::Keywords,
                method_label: MatchMethod::Keywords.label().to_string(),
                semantic_score: None,
                keyword_score: None,
                missing_keywords: keywords.missing_keywords,
                details: reason.to_string(),
            },
        }
    }
}

/// Semantic similarity scaled to 0–100 (may dip below 0 for opposed texts).
async fn semantic_similarity(
    embedder: &dyn EmbeddingProvider,
    resume_text: &str,
    jd_text: &str,
) -> Result<f64, EmbeddingError> {
    let (resume_emb, jd_emb) =
        tokio::try_join!(embedder.embed(resume_text), embedder.embed(jd_text))?;
    Ok(cosine_similarity(&resume_emb, &jd_emb) * 100.0)
}

/// Scores a resume against a job description. `role` is the target role
/// title; `embedder` is `None` when no credential is configured.
pub async fn match_score(
    resume_text: &str,
    jd_text: &str,
    role: Option<&str>,
    embedder: Option<&dyn EmbeddingProvider>,
) -> MatchResult {
    let resume_text = resume_text.to_lowercase();
    let jd_text = jd_text.to_lowercase();

    let keywords = keyword_overlap_score(&resume_text, &jd_text, role);

    let outcome = match embedder {
        None => Outcome::KeywordsOnly {
            reason: "No API key; used keyword overlap.",
        },
        Some(embedder) => match semantic_similarity(embedder, &resume_text, &jd_text).await {
            Ok(semantic) => Outcome::Semantic {
                semantic,
                model: embedder.model().to_string(),
            },
            Err(e) => {
                warn!("Embedding request failed, falling back to keywords: {e}");
                Outcome::KeywordsOnly {
                    reason: "HF request failed; used keyword overlap.",
                }
            }
        },
    };

    let result = outcome.into_result(keywords);
    debug!(
        score = result.score,
        method = ?result.method,
        missing = result.missing_keywords.len(),
        "Resume match computed"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const RESUME: &str = "Python Django REST API developer";
    const JD: &str = "Looking for a Python developer with REST API experience";

    /// Returns the same vector for every text.
    struct FixedEmbedder(Vec<f32>);

    #[async_trait]
    impl EmbeddingProvider for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Ok(self.0.clone())
        }

        fn model(&self) -> &str {
            "fixed"
        }
    }

    /// Returns opposite vectors depending on the text, to force negative similarity.
    struct OpposedEmbedder;

    #[async_trait]
    impl EmbeddingProvider for OpposedEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            if text.contains("looking") {
                Ok(vec![-1.0, 0.0])
            } else {
                Ok(vec![1.0, 0.0])
            }
        }

        fn model(&self) -> &str {
            "opposed"
        }
    }

    /// Always fails, counting how often it was asked.
    #[derive(Default)]
    struct FailingEmbedder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmbeddingProvider for FailingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(EmbeddingError::Api {
                status: 503,
                message: "model loading".to_string(),
            })
        }

        fn model(&self) -> &str {
            "failing"
        }
    }

    fn keyword_only_score(role: Option<&str>) -> u32 {
        keyword_overlap_score(&RESUME.to_lowercase(), &JD.to_lowercase(), role)
            .score
            .round() as u32
    }

    #[tokio::test]
    async fn test_no_embedder_uses_keywords() {
        let result = match_score(RESUME, JD, None, None).await;
        assert_eq!(result.method, MatchMethod::Keywords);
        assert_eq!(result.score, keyword_only_score(None));
        assert!(result.semantic_score.is_none());
        assert!(result.keyword_score.is_none());
        assert_eq!(result.details, "No API key; used keyword overlap.");
    }

    #[tokio::test]
    async fn test_failing_embedder_falls_back_to_keywords() {
        let embedder = FailingEmbedder::default();
        let result = match_score(RESUME, JD, Some("Python Developer"), Some(&embedder)).await;

        assert!(embedder.calls.load(Ordering::SeqCst) >= 1);
        assert_eq!(result.method, MatchMethod::Keywords);
        assert_eq!(result.score, keyword_only_score(Some("Python Developer")));
        assert_eq!(result.details, "HF request failed; used keyword overlap.");
    }

    #[tokio::test]
    async fn test_semantic_blend() {
        // Identical embeddings → semantic 100
        let embedder = FixedEmbedder(vec![0.3, 0.1, 0.7]);
        let result = match_score(RESUME, JD, None, Some(&embedder)).await;

        let keyword = keyword_overlap_score(&RESUME.to_lowercase(), &JD.to_lowercase(), None).score;
        let expected = (0.7 * 100.0 + 0.3 * keyword).round() as u32;

        assert_eq!(result.method, MatchMethod::SemanticKeywords);
        assert_eq!(result.semantic_score, Some(100));
        assert_eq!(result.keyword_score, Some(keyword.round() as u32));
        assert_eq!(result.score, expected);
        assert_eq!(result.details, "Used HF embeddings (fixed) + keyword overlap.");
    }

    #[tokio::test]
    async fn test_negative_similarity_clamps_to_zero() {
        let result = match_score(RESUME, JD, None, Some(&OpposedEmbedder)).await;
        // 0.7 × -100 + 0.3 × keyword < 0
        assert_eq!(result.method, MatchMethod::SemanticKeywords);
        assert_eq!(result.score, 0);
        assert_eq!(result.semantic_score, Some(0));
    }

    #[tokio::test]
    async fn test_missing_keywords_carried_through() {
        let result = match_score(RESUME, JD, Some("Senior Python Engineer"), None).await;
        // "senior"/"engineer" never appear in the JD, so nothing is missing
        assert!(result.missing_keywords.is_empty());

        let result = match_score("rust", JD, Some("python developer"), None).await;
        assert_eq!(result.missing_keywords, vec!["python", "developer"]);
    }

    #[test]
    fn test_semantic_details_use_short_model_name() {
        let result = Outcome::Semantic {
            semantic: 80.0,
            model: crate::embedding_client::MODEL.to_string(),
        }
        .into_result(KeywordOverlap {
            score: 50.0,
            missing_keywords: vec![],
        });
        assert_eq!(
            result.details,
            "Used HF embeddings (all-MiniLM-L6-v2) + keyword overlap."
        );
        assert_eq!(result.score, 71);
    }

    #[test]
    fn test_method_serde() {
        assert_eq!(
            serde_json::to_string(&MatchMethod::SemanticKeywords).unwrap(),
            r#""semantic+keywords""#
        );
        assert_eq!(
            serde_json::to_string(&MatchMethod::Keywords).unwrap(),
            r#""keywords""#
        );
        assert_eq!(MatchMethod::Keywords.label(), "Keywords Only");
    }

    #[test]
    fn test_keyword_result_omits_sub_scores_in_json() {
        let result = Outcome::KeywordsOnly { reason: "test" }.into_result(KeywordOverlap {
            score: 42.4,
            missing_keywords: vec![],
        });
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["score"], 42);
        assert_eq!(value["methodLabel"], "Keywords Only");
        assert!(value.get("semanticScore").is_none());
        assert!(value.get("keywordScore").is_none());
    }
}
