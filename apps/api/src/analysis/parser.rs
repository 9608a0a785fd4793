//! Raw posting → structured fields and pre-filled signals.
//!
//! Everything here is deterministic pattern matching over the pasted text:
//! contact details, role, pay and duration are pulled out with regexes, and
//! a fixed list of red-flag phrase groups is checked. Groups that correspond
//! to a scorer signal pre-set it; the caller reviews and submits the rest.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::signals::InternshipSignals;

/// Labels that open a line but never name the company.
const LABEL_LINE: &str = r"(?i)^(about|start date|duration|stipend|salary|position|role|internship|location|apply|actively|hiring)";
const POSITION_WORDS: &str = r"(?i)(intern|admin|manager|developer|engineer|analyst|assist|coord|execut|trainee|assoc|designer|specialist)";
const POSITION_LABELS: [&str; 6] = [
    "position",
    "role",
    "designation",
    "title",
    "job title",
    "internship role",
];
const SALARY_LABELS: [&str; 4] = ["salary", "stipend", "compensation", "remuneration"];
const DURATION_LABELS: [&str; 4] = ["duration", "period", "length", "timeline"];
/// Addresses that are never a real recruiter contact.
const PLACEHOLDER_EMAIL: &str = r"(?i)(example|test|sample|noreply)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlag {
    PaymentRequired,
    PersonalInfo,
    BankDetails,
    UnrealisticSalary,
    PressureToDecide,
    VagueCommunication,
    NoContract,
    Unprofessional,
}

impl RedFlag {
    pub const ALL: [RedFlag; 8] = [
        RedFlag::PaymentRequired,
        RedFlag::PersonalInfo,
        RedFlag::BankDetails,
        RedFlag::UnrealisticSalary,
        RedFlag::PressureToDecide,
        RedFlag::VagueCommunication,
        RedFlag::NoContract,
        RedFlag::Unprofessional,
    ];

    fn patterns(self) -> &'static [&'static str] {
        match self {
            RedFlag::PaymentRequired => &[
                r"\brequires\s+payment\b",
                r"registration\s+fee",
                r"upfront\s+(?:cost|payment|fee)",
                r"pay\s+to\s+(?:apply|join|start)",
                r"deposit\s+required",
                r"upfront\s+investment",
                r"₹\s*\d+\s*(?:fee|cost|payment)",
            ],
            RedFlag::PersonalInfo => &[
                r"aadhaa?r",
                r"\bpan\b",
                r"passport",
                r"\bssn\b",
                r"credit\s+card",
            ],
            RedFlag::BankDetails => &[r"bank\s+(?:account|details)"],
            RedFlag::UnrealisticSalary => &[
                r"earn\s+(?:fast|quick|money)",
                r"quick\s+(?:money|cash|earnings)",
                r"passive\s+income",
                r"make\s+money\s+fast",
                r"guaranteed\s+(?:income|earnings)",
                r"\b(?:50000|100000|unlimited)\s+(?:per\s+month|monthly)\b",
            ],
            RedFlag::PressureToDecide => &[
                r"(?:only|just)\s+\d+\s+(?:spots|positions|seats)\s+(?:left|available)",
                r"(?:immediate|urgent)\s+(?:decision|action|hiring)",
                r"decide\s+(?:now|today|immediately)",
                r"(?:limited|urgent)\s+(?:opportunity|positions)",
            ],
            RedFlag::VagueCommunication => &[
                r"(?:no\s+)?(?:experience|skills?)\s+(?:required|needed)",
                r"simple\s+tasks",
                r"(?:complete|just)\s+(?:simple|easy)\s+tasks",
            ],
            RedFlag::NoContract => &[
                r"(?:no|without)\s+(?:written\s+)?contract",
                r"verbal\s+agreement",
                r"informal\s+arrangement",
            ],
            RedFlag::Unprofessional => &[r"!!+", r"\bclick\s+here\b", r"apply\s+(?:now|today|here)"],
        }
    }

    /// All phrases of the group as one case-insensitive alternation.
    fn regex(self) -> &'static Regex {
        static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
        let compiled = COMPILED.get_or_init(|| {
            RedFlag::ALL
                .iter()
                .map(|flag| {
                    let alternation = flag.patterns().join("|");
                    Regex::new(&format!("(?i){alternation}")).expect("static red flag regex")
                })
                .collect()
        });
        &compiled[self as usize]
    }

    /// Scorer signal set by this group, if it has one.
    fn raise(self, signals: &mut InternshipSignals) {
        match self {
            RedFlag::PaymentRequired => signals.requires_payment = true,
            RedFlag::PersonalInfo => signals.requests_personal_info = true,
            RedFlag::BankDetails => signals.requests_bank_details = true,
            RedFlag::UnrealisticSalary => signals.unrealistic_salary = true,
            RedFlag::PressureToDecide => signals.pressure_to_decide = true,
            RedFlag::VagueCommunication => signals.vague_responses = true,
            RedFlag::NoContract => signals.no_contract = true,
            RedFlag::Unprofessional => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkType {
    /// Checked in this order; the first hit wins.
    const KEYWORDS: [(WorkType, &'static [&'static str]); 3] = [
        (WorkType::Remote, &["remote", "work from home", "wfh", "online"]),
        (WorkType::Hybrid, &["hybrid", "mixed", "flexible"]),
        (WorkType::Onsite, &["onsite", "office", "in-office", "on-site"]),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPosting {
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub contact_email: Option<String>,
    pub position: Option<String>,
    pub salary: Option<String>,
    pub duration: Option<String>,
    pub work_type: Option<WorkType>,
    /// Detected groups, in `RedFlag::ALL` order.
    pub red_flags: Vec<RedFlag>,
    /// Signals pre-filled from the extracted fields and red flags.
    pub signals: InternshipSignals,
}

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static parser regex"))
}

fn label_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, LABEL_LINE)
}

fn position_words() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, POSITION_WORDS)
}

/// `Label: value` on one line, for any of `labels`; returns the trimmed value.
fn labelled_value(text: &str, labels: &[&str]) -> Option<String> {
    labels.iter().find_map(|label| {
        let re = Regex::new(&format!(r"(?i){}[:\s\-–]+([^\n]+)", regex::escape(label))).ok()?;
        let value = re.captures(text)?.get(1)?.as_str().trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn non_empty_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn starts_uppercase(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

pub fn extract_company_name(text: &str) -> Option<String> {
    static LEGAL_SUFFIX: OnceLock<Regex> = OnceLock::new();
    static LABELLED: OnceLock<Regex> = OnceLock::new();
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    static MONEY: OnceLock<Regex> = OnceLock::new();
    static ABOUT: OnceLock<Regex> = OnceLock::new();
    static FIELD_LABEL: OnceLock<Regex> = OnceLock::new();

    let lines = non_empty_lines(text);

    // Registered entity suffixes
    let legal_suffix = cached(
        &LEGAL_SUFFIX,
        r"(?i)\b(PRIVATE LIMITED|PVT\.?\s*LTD|LTD|LIMITED|INC|CORP|CORPORATION)\b",
    );
    if let Some(line) = lines.iter().find(|line| legal_suffix.is_match(line)) {
        return Some(line.to_string());
    }

    // "Company: Acme"
    let labelled = cached(
        &LABELLED,
        r"(?i)(?:company|organization|firm|employer)\s*:\s*(.+)",
    );
    if let Some(name) = lines.iter().find_map(|line| {
        let name = labelled.captures(line)?.get(1)?.as_str().trim();
        (!name.is_empty()).then_some(name)
    }) {
        return Some(name.to_string());
    }

    // Postings tend to repeat the company name
    let numeric = cached(&NUMERIC, r"^[\d\s,/-]+$");
    let money = cached(&MONEY, r"(?i)[₹$€£]\s*[\d,]+|per\s+month|per\s+annum");
    let lower = text.to_lowercase();
    let mut repeated: Vec<(&str, usize)> = lines
        .iter()
        .take(15)
        .filter(|line| {
            !label_line().is_match(line)
                && line.chars().count() >= 3
                && !numeric.is_match(line)
                && !money.is_match(line)
        })
        .map(|line| (*line, lower.matches(&line.to_lowercase()).count()))
        .filter(|(_, occurrences)| *occurrences >= 2)
        .collect();
    repeated.sort_by(|a, b| b.1.cmp(&a.1));
    if let Some((line, _)) = repeated.first() {
        return Some(line.to_string());
    }

    // Short proper-cased line
    if let Some(line) = lines.iter().take(12).find(|line| {
        let words = line.split_whitespace().count();
        !label_line().is_match(line)
            && (1..=3).contains(&words)
            && line.split_whitespace().any(starts_uppercase)
            && **line != line.to_lowercase()
    }) {
        return Some(line.to_string());
    }

    // "About Acme"
    let about = cached(&ABOUT, r"(?i)^about\s+(?:the\s+)?(.+?)(?:\s*:|$)");
    if let Some(name) = lines.iter().find_map(|line| {
        let name = about.captures(line)?.get(1)?.as_str().trim();
        (name.chars().count() > 2).then_some(name)
    }) {
        return Some(name.to_string());
    }

    let field_label = cached(
        &FIELD_LABEL,
        r"(?i)^(role|position|location|duration|stipend):",
    );
    lines
        .iter()
        .take(5)
        .find(|line| {
            starts_uppercase(line) && !field_label.is_match(line) && line.chars().count() > 2
        })
        .or_else(|| {
            lines.iter().find(|line| {
                line.chars().count() > 5 && !line.chars().all(|c| c.is_ascii_digit())
            })
        })
        .map(|line| line.to_string())
}

pub fn extract_website(text: &str) -> Option<String> {
    static URL: OnceLock<Regex> = OnceLock::new();
    cached(
        &URL,
        r"https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()@:%_+.~#?&/=]*",
    )
    .find(text)
    .map(|m| m.as_str().to_string())
}

/// First address that is not an obvious placeholder.
pub fn extract_email(text: &str) -> Option<String> {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let placeholder = cached(&PLACEHOLDER, PLACEHOLDER_EMAIL);
    cached(&EMAIL, r"[\w.-]+@[\w.-]+\.\w+")
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|email| !placeholder.is_match(email))
        .map(str::to_string)
}

pub fn extract_position(text: &str) -> Option<String> {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    let lines = non_empty_lines(text);

    // A title line usually opens the posting
    let entity = cached(&ENTITY, r"(?i)\b(PRIVATE LIMITED|LTD|INC|CORP)\b");
    if let Some(first) = lines.first() {
        let len = first.chars().count();
        if (3..50).contains(&len) && !entity.is_match(first) && position_words().is_match(first) {
            return Some(first.to_string());
        }
    }

    labelled_value(text, &POSITION_LABELS)
        .filter(|value| value.chars().count() >= 3)
        .or_else(|| {
            lines
                .iter()
                .take(10)
                .find(|line| {
                    let len = line.chars().count();
                    (3..100).contains(&len) && position_words().is_match(line)
                })
                .map(|line| line.to_string())
        })
}

pub fn extract_salary(text: &str) -> Option<String> {
    static RANGE: OnceLock<Regex> = OnceLock::new();
    static CURRENCY: OnceLock<Regex> = OnceLock::new();

    let range = cached(
        &RANGE,
        r"(?i)(?:stipend|salary)[:\s]*(?:₹|Rs\.?|\$)\s*([\d,]+\s*-\s*[\d,]+\s*(?:/month|per month)?)",
    );
    if let Some(captures) = range.captures(text) {
        if let Some(m) = captures.get(1) {
            return Some(m.as_str().trim().to_string());
        }
    }

    labelled_value(text, &SALARY_LABELS).or_else(|| {
        cached(&CURRENCY, r"(?:Rs|₹|\$|€|£)\s*[\d,]+(?:\.\d{2})?")
            .find(text)
            .map(|m| m.as_str().to_string())
    })
}

pub fn extract_duration(text: &str) -> Option<String> {
    static SPAN: OnceLock<Regex> = OnceLock::new();
    cached(&SPAN, r"(?i)\d+\s*(?:weeks?|months?|years?)")
        .find(text)
        .map(|m| m.as_str().to_lowercase())
        .or_else(|| labelled_value(text, &DURATION_LABELS))
}

pub fn extract_work_type(text: &str) -> Option<WorkType> {
    let lower = text.to_lowercase();
    WorkType::KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(work_type, _)| *work_type)
}

pub fn extract_red_flags(text: &str) -> Vec<RedFlag> {
    RedFlag::ALL
        .into_iter()
        .filter(|flag| flag.regex().is_match(text))
        .collect()
}

/// Parses a pasted posting. Never fails; fields that cannot be found are `None`.
pub fn parse_posting(text: &str) -> ParsedPosting {
    let red_flags = extract_red_flags(text);

    let mut signals = InternshipSignals {
        company_name: extract_company_name(text),
        company_website: extract_website(text),
        contact_email: extract_email(text),
        position: extract_position(text),
        ..Default::default()
    };
    for flag in &red_flags {
        flag.raise(&mut signals);
    }

    ParsedPosting {
        company_name: signals.company_name.clone(),
        company_website: signals.company_website.clone(),
        contact_email: signals.contact_email.clone(),
        position: signals.position.clone(),
        salary: extract_salary(text),
        duration: extract_duration(text),
        work_type: extract_work_type(text),
        red_flags,
        signals,
    }
}
