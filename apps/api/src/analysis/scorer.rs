//! Credibility scorer: deterministic mapping from `InternshipSignals` to `AnalysisResult`.
//!
//! No function here can fail: an absent or malformed signal simply means the
//! corresponding rule does not fire.

use chrono::Utc;

use crate::analysis::models::{AnalysisResult, CredibilityLevel, ScoreBand, ScoreSet};
use crate::analysis::rules::{
    COMMUNICATION_RULES, COMPANY_RULES, OFFER_RULES, REQUIREMENTS_RULES,
};
use crate::analysis::signals::InternshipSignals;

/// Sub-scores below this trigger the category's advisories.
const ADVISORY_THRESHOLD: u32 = 60;
/// Totals below this add the general high-risk warning.
const HIGH_RISK_THRESHOLD: f64 = 40.0;

pub const PAYMENT_RECOMMENDATION: &str = "⚠️ NEVER pay for an internship opportunity";
pub const PAYMENT_WARNING: &str = "🚨 CRITICAL: Payment required - Likely a SCAM";
pub const BANK_DETAILS_WARNING: &str = "🚨 CRITICAL: Bank details requested - Do NOT share";
pub const HIGH_RISK_WARNING: &str = "⚠️ HIGH RISK: Multiple red flags detected";
pub const NO_CONTRACT_WARNING: &str = "⚠️ WARNING: No written contract mentioned";
pub const PRESSURE_WARNING: &str = "⚠️ WARNING: Pressure tactics being used";

const COMPANY_ADVICE: [&str; 2] = [
    "Verify company registration and legitimacy",
    "Research company reviews on Glassdoor and LinkedIn",
];
const OFFER_ADVICE: [&str; 2] = [
    "Request a detailed written contract",
    "Clarify all terms and conditions before accepting",
];
const COMMUNICATION_ADVICE: [&str; 2] = [
    "Ask for clarification on vague points",
    "Request official company email communication",
];
const REQUIREMENTS_ADVICE: [&str; 2] = [
    "Never share bank details or personal documents upfront",
    "Question any unusual requirements",
];

pub fn calculate_company_score(signals: &InternshipSignals) -> u32 {
    COMPANY_RULES.score(signals)
}

pub fn calculate_offer_score(signals: &InternshipSignals) -> u32 {
    OFFER_RULES.score(signals)
}

pub fn calculate_communication_score(signals: &InternshipSignals) -> u32 {
    COMMUNICATION_RULES.score(signals)
}

pub fn calculate_requirements_score(signals: &InternshipSignals) -> u32 {
    REQUIREMENTS_RULES.score(signals)
}

pub fn calculate_scores(signals: &InternshipSignals) -> ScoreSet {
    ScoreSet {
        company_score: calculate_company_score(signals),
        offer_score: calculate_offer_score(signals),
        communication_score: calculate_communication_score(signals),
        requirements_score: calculate_requirements_score(signals),
    }
}

pub fn credibility_level(total_score: f64) -> CredibilityLevel {
    CredibilityLevel::from_score(total_score)
}

/// Advisories in category order (company, offer, communication,
/// requirements), then the payment advisory. Duplicates are kept.
pub fn generate_recommendations(scores: &ScoreSet, signals: &InternshipSignals) -> Vec<String> {
    let categories = [
        (scores.company_score, COMPANY_ADVICE),
        (scores.offer_score, OFFER_ADVICE),
        (scores.communication_score, COMMUNICATION_ADVICE),
        (scores.requirements_score, REQUIREMENTS_ADVICE),
    ];

    let mut recommendations: Vec<String> = categories
        .iter()
        .filter(|(score, _)| *score < ADVISORY_THRESHOLD)
        .flat_map(|(_, advice)| advice.iter().map(|a| a.to_string()))
        .collect();

    if signals.requires_payment {
        recommendations.push(PAYMENT_RECOMMENDATION.to_string());
    }

    recommendations
}

/// Alerts in fixed order. Only the high-risk alert looks at the total score.
pub fn generate_warnings(total_score: f64, signals: &InternshipSignals) -> Vec<String> {
    let checks = [
        (signals.requires_payment, PAYMENT_WARNING),
        (signals.requests_bank_details, BANK_DETAILS_WARNING),
        (total_score < HIGH_RISK_THRESHOLD, HIGH_RISK_WARNING),
        (signals.no_contract, NO_CONTRACT_WARNING),
        (signals.pressure_to_decide, PRESSURE_WARNING),
    ];

    checks
        .iter()
        .filter(|(fired, _)| *fired)
        .map(|(_, warning)| warning.to_string())
        .collect()
}

pub fn analyze_internship(signals: &InternshipSignals) -> AnalysisResult {
    let scores = calculate_scores(signals);
    let total_score = scores.mean();
    let level = credibility_level(total_score);

    tracing::debug!(
        company = scores.company_score,
        offer = scores.offer_score,
        communication = scores.communication_score,
        requirements = scores.requirements_score,
        total_score,
        "Internship scored as {level:?}"
    );

    AnalysisResult {
        scores,
        total_score,
        credibility_level: level,
        score_band: ScoreBand::from_score(total_score),
        summary: level.summary().to_string(),
        recommendations: generate_recommendations(&scores, signals),
        warnings: generate_warnings(total_score, signals),
        timestamp: Utc::now(),
        resume_match: None,
    }
}
