//! Validation of a CAP document model.
//!
//! Every applicable rule is evaluated and all violations are returned, so a
//! caller gets the complete correction list in one pass. Content problems are
//! never errors: an empty list means the alert is accepted, advisory findings
//! aside.

pub mod catalog;
pub mod fields;
mod finding;
mod rules;

pub use finding::{accepted, Finding, FindingKind, Severity};

use crate::models::Alert;
use crate::parsing::parse_alert;
use chrono::{DateTime, Utc};

/// Validate an alert as of now.
pub fn validate(alert: &Alert) -> Vec<Finding> {
    validate_at(alert, Utc::now())
}

/// Validate an alert, judging expiry against `now`.
pub fn validate_at(alert: &Alert, now: DateTime<Utc>) -> Vec<Finding> {
    let findings = rules::check_alert(alert, now);
    tracing::debug!(
        identifier = %alert.identifier,
        findings = findings.len(),
        blocking = findings.iter().filter(|f| f.is_blocking()).count(),
        "alert validated"
    );
    findings
}

/// Parse and validate raw markup. A document that cannot be ingested yields
/// a single structural finding and nothing else is checked.
pub fn validate_xml(xml: &str) -> Vec<Finding> {
    match parse_alert(xml) {
        Ok(alert) => validate(&alert),
        Err(e) => vec![Finding::structural("alert", e.to_string())],
    }
}
