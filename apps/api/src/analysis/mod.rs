// Internship credibility analysis.
// Signals → four rule tables → sub-scores → total, tier, advisories and warnings.

pub mod handlers;
pub mod models;
pub mod parser;
pub mod rules;
pub mod scorer;
pub mod signals;
pub mod validation;
