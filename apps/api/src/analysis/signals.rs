//! The flat signal record collected about one internship offer.
//!
//! Every field is optional on the wire. Missing, null or malformed values
//! fall back to "not set" instead of rejecting the request.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InternshipSignals {
    // ── Company ────────────────────────────────────────────────────────────
    #[serde(deserialize_with = "text")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub company_website: Option<String>,
    #[serde(deserialize_with = "text")]
    pub contact_email: Option<String>,
    /// Role title, also used as context by the resume matcher.
    #[serde(deserialize_with = "text")]
    pub position: Option<String>,
    #[serde(rename = "hasLinkedIn", deserialize_with = "flag")]
    pub has_linkedin: bool,
    #[serde(deserialize_with = "flag")]
    pub has_glassdoor: bool,
    #[serde(deserialize_with = "flag")]
    pub is_registered: bool,

    // ── Offer ──────────────────────────────────────────────────────────────
    #[serde(deserialize_with = "flag")]
    pub requires_payment: bool,
    #[serde(deserialize_with = "flag")]
    pub no_job_description: bool,
    #[serde(deserialize_with = "flag")]
    pub unrealistic_salary: bool,
    #[serde(deserialize_with = "flag")]
    pub immediate_start: bool,
    #[serde(deserialize_with = "flag")]
    pub no_contract: bool,

    // ── Communication ──────────────────────────────────────────────────────
    #[serde(deserialize_with = "flag")]
    pub professional_email: bool,
    #[serde(deserialize_with = "flag")]
    pub detailed_job_description: bool,
    #[serde(deserialize_with = "flag")]
    pub clear_timeline: bool,
    #[serde(deserialize_with = "flag")]
    pub pressure_to_decide: bool,
    #[serde(deserialize_with = "flag")]
    pub vague_responses: bool,
    #[serde(deserialize_with = "flag")]
    pub multiple_followups: bool,

    // ── Requirements ───────────────────────────────────────────────────────
    #[serde(deserialize_with = "flag")]
    pub reasonable_skills: bool,
    #[serde(deserialize_with = "flag")]
    pub clear_expectations: bool,
    #[serde(deserialize_with = "flag")]
    pub mentioned_training: bool,
    #[serde(deserialize_with = "flag")]
    pub requests_personal_info: bool,
    #[serde(deserialize_with = "flag")]
    pub requests_bank_details: bool,
    #[serde(deserialize_with = "flag")]
    pub unusual_requirements: bool,
}

impl InternshipSignals {
    pub fn website(&self) -> Option<&str> {
        self.company_website.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }

    pub fn role_title(&self) -> Option<&str> {
        self.position.as_deref()
    }
}

/// Lenient boolean: accepts booleans, numbers and the usual form strings
/// ("on", "true", "yes"). Anything else, including null, is `false`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => {
            let s = s.trim().to_ascii_lowercase();
            !s.is_empty() && !matches!(s.as_str(), "false" | "0" | "off" | "no")
        }
        _ => false,
    })
}

/// Lenient optional text: blank strings and non-string values become `None`.
/// Other strings are kept verbatim, surrounding whitespace included.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}
