use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::MatchResult;

/// Discrete credibility tier derived from the averaged sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredibilityLevel {
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "MODERATE")]
    Moderate,
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "VERY LOW")]
    VeryLow,
}

impl CredibilityLevel {
    /// Inclusive lower bounds, checked from the top: 80 / 60 / 40.
    pub fn from_score(total_score: f64) -> Self {
        if total_score >= 80.0 {
            CredibilityLevel::High
        } else if total_score >= 60.0 {
            CredibilityLevel::Moderate
        } else if total_score >= 40.0 {
            CredibilityLevel::Low
        } else {
            CredibilityLevel::VeryLow
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            CredibilityLevel::High => "This internship appears to be legitimate and trustworthy.",
            CredibilityLevel::Moderate => {
                "This internship has some concerns. Proceed with caution."
            }
            CredibilityLevel::Low => {
                "This internship has multiple red flags. Investigate thoroughly."
            }
            CredibilityLevel::VeryLow => {
                "This internship is highly suspicious. Strongly recommend avoiding."
            }
        }
    }
}

/// Colour band used when displaying any 0–100 score (sub-scores, totals, matches).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreBand {
    High,
    Moderate,
    Low,
    VeryLow,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        match CredibilityLevel::from_score(score) {
            CredibilityLevel::High => ScoreBand::High,
            CredibilityLevel::Moderate => ScoreBand::Moderate,
            CredibilityLevel::Low => ScoreBand::Low,
            CredibilityLevel::VeryLow => ScoreBand::VeryLow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSet {
    pub company_score: u32,
    pub offer_score: u32,
    pub communication_score: u32,
    pub requirements_score: u32,
}

impl ScoreSet {
    /// Unweighted mean of the four sub-scores.
    pub fn mean(&self) -> f64 {
        let sum = self.company_score
            + self.offer_score
            + self.communication_score
            + self.requirements_score;
        f64::from(sum) / 4.0
    }
}

/// Output of one analysis run. Built once, then only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub scores: ScoreSet,
    pub total_score: f64,
    pub credibility_level: CredibilityLevel,
    pub score_band: ScoreBand,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_match: Option<MatchResult>,
}

impl AnalysisResult {
    pub fn with_resume_match(self, resume_match: MatchResult) -> Self {
        Self {
            resume_match: Some(resume_match),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(CredibilityLevel::from_score(100.0), CredibilityLevel::High);
        assert_eq!(CredibilityLevel::from_score(80.0), CredibilityLevel::High);
        assert_eq!(CredibilityLevel::from_score(79.999), CredibilityLevel::Moderate);
        assert_eq!(CredibilityLevel::from_score(60.0), CredibilityLevel::Moderate);
        assert_eq!(CredibilityLevel::from_score(59.999), CredibilityLevel::Low);
        assert_eq!(CredibilityLevel::from_score(40.0), CredibilityLevel::Low);
        assert_eq!(CredibilityLevel::from_score(39.999), CredibilityLevel::VeryLow);
        assert_eq!(CredibilityLevel::from_score(0.0), CredibilityLevel::VeryLow);
    }

    #[test]
    fn test_level_serializes_with_space() {
        let json = serde_json::to_string(&CredibilityLevel::VeryLow).unwrap();
        assert_eq!(json, r#""VERY LOW""#);
        let level: CredibilityLevel = serde_json::from_str(r#""MODERATE""#).unwrap();
        assert_eq!(level, CredibilityLevel::Moderate);
    }

    #[test]
    fn test_score_band_serde() {
        assert_eq!(
            serde_json::to_string(&ScoreBand::VeryLow).unwrap(),
            r#""very-low""#
        );
        assert_eq!(ScoreBand::from_score(62.5), ScoreBand::Moderate);
    }

    #[test]
    fn test_mean() {
        let scores = ScoreSet {
            company_score: 0,
            offer_score: 20,
            communication_score: 50,
            requirements_score: 10,
        };
        assert!((scores.mean() - 20.0).abs() < f64::EPSILON);

        let uneven = ScoreSet {
            company_score: 55,
            offer_score: 50,
            communication_score: 50,
            requirements_score: 50,
        };
        assert!((uneven.mean() - 51.25).abs() < f64::EPSILON);
    }
}
