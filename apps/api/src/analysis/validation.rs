use std::sync::OnceLock;

use regex::Regex;
use url::Url;

/// A URL is valid when it parses as an absolute URL (scheme required).
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex"))
        .is_match(value)
}

/// Domain part of an email address: everything after the `@`.
pub fn email_domain(email: &str) -> Option<&str> {
    email.split('@').nth(1)
}

/// Host part of a company website as typed by the user: protocol and a
/// leading `www.` are stripped, and the path is dropped.
///
/// `https://www.acme.io/careers` → `acme.io`
pub fn website_host(website: &str) -> &str {
    let rest = website
        .strip_prefix("https://")
        .or_else(|| website.strip_prefix("http://"))
        .unwrap_or(website);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    rest.split('/').next().unwrap_or(rest)
}

/// True when the contact email is sent from the company's own domain.
/// Comparison is exact; an invalid email never matches.
pub fn email_matches_website(email: &str, website: &str) -> bool {
    is_valid_email(email) && email_domain(email) == Some(website_host(website))
}
