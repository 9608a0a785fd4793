//! Point tables for the four credibility categories.
//!
//! Each category is a base score plus a list of `(flag, delta)` rules. A rule
//! contributes its delta when its flag is set; the sum is clamped to 0–100.
//! The tables share no flags, so categories never influence each other.

use crate::analysis::signals::InternshipSignals;
use crate::analysis::validation::{email_matches_website, is_valid_url};

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

/// A single observable fact that a rule can reward or penalise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    ValidWebsite,
    EmailMatchesWebsite,
    HasLinkedIn,
    HasGlassdoor,
    IsRegistered,
    RequiresPayment,
    NoJobDescription,
    UnrealisticSalary,
    ImmediateStart,
    NoContract,
    ProfessionalEmail,
    DetailedJobDescription,
    ClearTimeline,
    PressureToDecide,
    VagueResponses,
    MultipleFollowups,
    ReasonableSkills,
    ClearExpectations,
    MentionedTraining,
    RequestsPersonalInfo,
    RequestsBankDetails,
    UnusualRequirements,
}

impl Flag {
    pub fn is_set(self, signals: &InternshipSignals) -> bool {
        match self {
            Flag::ValidWebsite => signals.website().is_some_and(is_valid_url),
            Flag::EmailMatchesWebsite => match (signals.email(), signals.website()) {
                (Some(email), Some(website)) => email_matches_website(email, website),
                _ => false,
            },
            Flag::HasLinkedIn => signals.has_linkedin,
            Flag::HasGlassdoor => signals.has_glassdoor,
            Flag::IsRegistered => signals.is_registered,
            Flag::RequiresPayment => signals.requires_payment,
            Flag::NoJobDescription => signals.no_job_description,
            Flag::UnrealisticSalary => signals.unrealistic_salary,
            Flag::ImmediateStart => signals.immediate_start,
            Flag::NoContract => signals.no_contract,
            Flag::ProfessionalEmail => signals.professional_email,
            Flag::DetailedJobDescription => signals.detailed_job_description,
            Flag::ClearTimeline => signals.clear_timeline,
            Flag::PressureToDecide => signals.pressure_to_decide,
            Flag::VagueResponses => signals.vague_responses,
            Flag::MultipleFollowups => signals.multiple_followups,
            Flag::ReasonableSkills => signals.reasonable_skills,
            Flag::ClearExpectations => signals.clear_expectations,
            Flag::MentionedTraining => signals.mentioned_training,
            Flag::RequestsPersonalInfo => signals.requests_personal_info,
            Flag::RequestsBankDetails => signals.requests_bank_details,
            Flag::UnusualRequirements => signals.unusual_requirements,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRule {
    pub flag: Flag,
    pub delta: i32,
}

const fn rule(flag: Flag, delta: i32) -> ScoreRule {
    ScoreRule { flag, delta }
}

#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    pub base: i32,
    pub rules: &'static [ScoreRule],
}

impl RuleTable {
    /// Base plus the deltas of every set flag, clamped to 0–100.
    pub fn score(&self, signals: &InternshipSignals) -> u32 {
        let raw = self
            .rules
            .iter()
            .filter(|r| r.flag.is_set(signals))
            .fold(self.base, |acc, r| acc + r.delta);
        raw.clamp(MIN_SCORE, MAX_SCORE) as u32
    }
}

pub const COMPANY_RULES: RuleTable = RuleTable {
    base: 0,
    rules: &[
        rule(Flag::ValidWebsite, 25),
        rule(Flag::EmailMatchesWebsite, 25),
        rule(Flag::HasLinkedIn, 15),
        rule(Flag::HasGlassdoor, 15),
        rule(Flag::IsRegistered, 20),
    ],
};

pub const OFFER_RULES: RuleTable = RuleTable {
    base: 50,
    rules: &[
        rule(Flag::RequiresPayment, -30),
        rule(Flag::NoJobDescription, -20),
        rule(Flag::UnrealisticSalary, -15),
        rule(Flag::ImmediateStart, -10),
        rule(Flag::NoContract, -25),
    ],
};

pub const COMMUNICATION_RULES: RuleTable = RuleTable {
    base: 50,
    rules: &[
        rule(Flag::ProfessionalEmail, 20),
        rule(Flag::DetailedJobDescription, 15),
        rule(Flag::ClearTimeline, 15),
        rule(Flag::PressureToDecide, -25),
        rule(Flag::VagueResponses, -20),
        rule(Flag::MultipleFollowups, -10),
    ],
};

pub const REQUIREMENTS_RULES: RuleTable = RuleTable {
    base: 50,
    rules: &[
        rule(Flag::ReasonableSkills, 20),
        rule(Flag::ClearExpectations, 15),
        rule(Flag::MentionedTraining, 15),
        rule(Flag::RequestsPersonalInfo, -30),
        rule(Flag::RequestsBankDetails, -40),
        rule(Flag::UnusualRequirements, -20),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL_TABLES: [RuleTable; 4] = [
        COMPANY_RULES,
        OFFER_RULES,
        COMMUNICATION_RULES,
        REQUIREMENTS_RULES,
    ];

    fn delta_of(table: &RuleTable, flag: Flag) -> i32 {
        table
            .rules
            .iter()
            .find(|r| r.flag == flag)
            .map(|r| r.delta)
            .unwrap()
    }

    #[test]
    fn test_tables_share_no_flags() {
        let mut seen = HashSet::new();
        for table in ALL_TABLES {
            for rule in table.rules {
                assert!(seen.insert(rule.flag), "{:?} appears in two tables", rule.flag);
            }
        }
        assert_eq!(seen.len(), 22);
    }

    #[test]
    fn test_offer_penalties() {
        assert_eq!(OFFER_RULES.base, 50);
        assert_eq!(delta_of(&OFFER_RULES, Flag::RequiresPayment), -30);
        assert_eq!(delta_of(&OFFER_RULES, Flag::NoJobDescription), -20);
        assert_eq!(delta_of(&OFFER_RULES, Flag::UnrealisticSalary), -15);
        assert_eq!(delta_of(&OFFER_RULES, Flag::ImmediateStart), -10);
        assert_eq!(delta_of(&OFFER_RULES, Flag::NoContract), -25);
    }

    #[test]
    fn test_requirements_deltas() {
        assert_eq!(delta_of(&REQUIREMENTS_RULES, Flag::ReasonableSkills), 20);
        assert_eq!(delta_of(&REQUIREMENTS_RULES, Flag::RequestsPersonalInfo), -30);
        assert_eq!(delta_of(&REQUIREMENTS_RULES, Flag::RequestsBankDetails), -40);
    }

    #[test]
    fn test_company_rewards_sum_to_100() {
        assert_eq!(COMPANY_RULES.base, 0);
        let total: i32 = COMPANY_RULES.rules.iter().map(|r| r.delta).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_score_clamps_to_zero() {
        let signals = InternshipSignals {
            requires_payment: true,
            no_job_description: true,
            no_contract: true,
            ..Default::default()
        };
        assert_eq!(OFFER_RULES.score(&signals), 0);
    }

    #[test]
    fn test_score_clamps_to_hundred() {
        let signals = InternshipSignals {
            professional_email: true,
            detailed_job_description: true,
            clear_timeline: true,
            ..Default::default()
        };
        assert_eq!(COMMUNICATION_RULES.score(&signals), 100);
    }

    #[test]
    fn test_email_match_needs_both_values() {
        let only_email = InternshipSignals {
            contact_email: Some("hr@acme.io".to_string()),
            ..Default::default()
        };
        assert!(!Flag::EmailMatchesWebsite.is_set(&only_email));

        let both = InternshipSignals {
            contact_email: Some("hr@acme.io".to_string()),
            company_website: Some("https://acme.io".to_string()),
            ..Default::default()
        };
        assert!(Flag::EmailMatchesWebsite.is_set(&both));
    }

    /// Turns on exactly the signal behind `flag`.
    fn raise(signals: &mut InternshipSignals, flag: Flag) {
        match flag {
            Flag::ValidWebsite => signals.company_website = Some("https://acme.io".to_string()),
            Flag::EmailMatchesWebsite => {
                signals.contact_email = Some("hr@acme.io".to_string());
                // Host matches but is not an absolute URL on its own
                if signals.company_website.is_none() {
                    signals.company_website = Some("acme.io".to_string());
                }
            }
            Flag::HasLinkedIn => signals.has_linkedin = true,
            Flag::HasGlassdoor => signals.has_glassdoor = true,
            Flag::IsRegistered => signals.is_registered = true,
            Flag::RequiresPayment => signals.requires_payment = true,
            Flag::NoJobDescription => signals.no_job_description = true,
            Flag::UnrealisticSalary => signals.unrealistic_salary = true,
            Flag::ImmediateStart => signals.immediate_start = true,
            Flag::NoContract => signals.no_contract = true,
            Flag::ProfessionalEmail => signals.professional_email = true,
            Flag::DetailedJobDescription => signals.detailed_job_description = true,
            Flag::ClearTimeline => signals.clear_timeline = true,
            Flag::PressureToDecide => signals.pressure_to_decide = true,
            Flag::VagueResponses => signals.vague_responses = true,
            Flag::MultipleFollowups => signals.multiple_followups = true,
            Flag::ReasonableSkills => signals.reasonable_skills = true,
            Flag::ClearExpectations => signals.clear_expectations = true,
            Flag::MentionedTraining => signals.mentioned_training = true,
            Flag::RequestsPersonalInfo => signals.requests_personal_info = true,
            Flag::RequestsBankDetails => signals.requests_bank_details = true,
            Flag::UnusualRequirements => signals.unusual_requirements = true,
        }
    }

    #[test]
    fn test_every_flag_combination_scores_within_bounds() {
        for table in ALL_TABLES {
            let n = table.rules.len();
            for mask in 0u32..(1 << n) {
                let mut signals = InternshipSignals::default();
                let mut expected = table.base;
                for (i, rule) in table.rules.iter().enumerate() {
                    if mask & (1 << i) != 0 {
                        raise(&mut signals, rule.flag);
                        expected += rule.delta;
                    }
                }

                for (i, rule) in table.rules.iter().enumerate() {
                    assert_eq!(
                        rule.flag.is_set(&signals),
                        mask & (1 << i) != 0,
                        "{:?} with mask {mask:b}",
                        rule.flag
                    );
                }

                let score = table.score(&signals);
                assert!(score <= 100, "mask {mask:b} scored {score}");
                assert_eq!(score as i32, expected.clamp(MIN_SCORE, MAX_SCORE));
            }
        }
    }

    #[test]
    fn test_padded_email_earns_no_domain_match() {
        let signals: InternshipSignals = serde_json::from_value(serde_json::json!({
            "contactEmail": "hr@acme.io ",
            "companyWebsite": "https://acme.io"
        }))
        .unwrap();
        assert_eq!(signals.email(), Some("hr@acme.io "));
        assert!(!Flag::EmailMatchesWebsite.is_set(&signals));
        assert_eq!(COMPANY_RULES.score(&signals), 25);
    }
}
