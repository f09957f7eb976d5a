//! Static rule tables.
//!
//! Each scope of the document has one [`RuleTable`]. Adding a field to the
//! schema means adding it to [`super::fields`] and to the lists here; the
//! validator picks it up without further changes.

use super::fields::{AlertField, Field, InfoField};
use super::rules::parse_timestamp;
use once_cell::sync::Lazy;
use regex::Regex;

/// `YYYY-MM-DDTHH:MM:SS±HH:MM`
pub const TIMESTAMP_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}[-+]\d{2}:\d{2}$";

pub const HEADLINE_MAX_CHARS: usize = 20;

pub const STATUS: &[&str] = &["Actual", "Exercise", "System", "Test", "Draft"];

pub const MSG_TYPE: &[&str] = &["Alert", "Update", "Cancel", "Ack", "Error"];

/// The msgType of a first issuance; every other type refers back to earlier alerts.
pub const MSG_TYPE_INITIAL: &str = "Alert";

pub const SCOPE: &[&str] = &["Public", "Restricted", "Private"];

pub const SCOPE_RESTRICTED: &str = "Restricted";
pub const SCOPE_PRIVATE: &str = "Private";

pub const CATEGORY: &[&str] = &[
    "Geo",
    "Met",
    "Safety",
    "Security",
    "Rescue",
    "Fire",
    "Health",
    "Env",
    "Transport",
    "Infra",
    "CBRNE",
    "Other",
];

pub const RESPONSE_TYPE: &[&str] = &[
    "Shelter", "Evacuate", "Prepare", "Execute", "Avoid", "Monitor", "Assess", "AllClear", "None",
];

pub const URGENCY: &[&str] = &["Immediate", "Expected", "Future", "Past", "Unknown"];

pub const SEVERITY: &[&str] = &["Extreme", "Severe", "Moderate", "Minor", "Unknown"];

pub const CERTAINTY: &[&str] = &["Observed", "Likely", "Possible", "Unlikely", "Unknown"];

/// Pattern a present value must match.
#[derive(Debug)]
pub struct FormatRule {
    pattern: Regex,
    /// Human-readable description of the expected shape.
    expected: String,
    /// Values must also denote a real instant.
    timestamp: bool,
}

impl FormatRule {
    fn new(pattern: &str, expected: impl Into<String>) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("rule catalog pattern must compile"),
            expected: expected.into(),
            timestamp: false,
        }
    }

    fn timestamp() -> Self {
        Self {
            timestamp: true,
            ..Self::new(TIMESTAMP_PATTERN, "YYYY-MM-DDTHH:MM:SS+HH:MM")
        }
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.pattern.is_match(value)
            && (!self.timestamp || parse_timestamp(value).is_some())
    }
}

static TIMESTAMP_RULE: Lazy<FormatRule> = Lazy::new(FormatRule::timestamp);

/// The rule shared by every timestamp, including the sent time embedded in references.
pub fn timestamp_rule() -> &'static FormatRule {
    &TIMESTAMP_RULE
}

static SIZE_RULE: Lazy<FormatRule> =
    Lazy::new(|| FormatRule::new(r"^[0-9]+$", "a whole number of bytes"));

static ELEVATION_RULE: Lazy<FormatRule> =
    Lazy::new(|| FormatRule::new(r"^[-+]?[0-9]+$", "a whole number of feet"));

/// Resource `size`.
pub fn size_rule() -> &'static FormatRule {
    &SIZE_RULE
}

/// Area `altitude` and `ceiling`.
pub fn elevation_rule() -> &'static FormatRule {
    &ELEVATION_RULE
}

/// Declarative rules for one scope of the document.
#[derive(Debug)]
pub struct RuleTable<F: Field> {
    pub required: &'static [F],
    pub optional: &'static [F],
    pub formats: Vec<(F, FormatRule)>,
    pub vocabularies: Vec<(F, &'static [&'static str])>,
}

impl<F: Field> RuleTable<F> {
    /// Listed required fields are required, and so is any field missing
    /// from both lists. Only listed optional fields are exempt.
    pub fn is_required(&self, field: F) -> bool {
        self.required.contains(&field) || !self.optional.contains(&field)
    }

    pub fn format(&self, field: F) -> Option<&FormatRule> {
        self.formats
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, rule)| rule)
    }

    pub fn vocabulary(&self, field: F) -> Option<&'static [&'static str]> {
        self.vocabularies
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, terms)| *terms)
    }
}

pub static ALERT_RULES: Lazy<RuleTable<AlertField>> = Lazy::new(|| RuleTable {
    required: &[
        AlertField::Identifier,
        AlertField::Sender,
        AlertField::Sent,
        AlertField::Status,
        AlertField::MsgType,
        AlertField::Scope,
        AlertField::Info,
    ],
    optional: &[
        AlertField::Source,
        AlertField::Restriction,
        AlertField::Addresses,
        AlertField::Code,
        AlertField::Note,
        AlertField::References,
        AlertField::Incidents,
    ],
    formats: vec![
        (
            AlertField::Identifier,
            FormatRule::new(r"^[^\s,<&]+$", "no spaces, commas, '<' or '&'"),
        ),
        (
            AlertField::Sender,
            FormatRule::new(r"^[^\s,<&]+$", "no spaces, commas, '<' or '&'"),
        ),
        (AlertField::Sent, FormatRule::timestamp()),
    ],
    vocabularies: vec![
        (AlertField::Status, STATUS),
        (AlertField::MsgType, MSG_TYPE),
        (AlertField::Scope, SCOPE),
    ],
});

pub static INFO_RULES: Lazy<RuleTable<InfoField>> = Lazy::new(|| RuleTable {
    required: &[
        InfoField::Category,
        InfoField::Event,
        InfoField::Urgency,
        InfoField::Severity,
        InfoField::Certainty,
        InfoField::Expires,
        InfoField::Area,
    ],
    optional: &[
        InfoField::Language,
        InfoField::ResponseType,
        InfoField::Audience,
        InfoField::EventCode,
        InfoField::Effective,
        InfoField::Onset,
        InfoField::SenderName,
        InfoField::Headline,
        InfoField::Description,
        InfoField::Instruction,
        InfoField::Web,
        InfoField::Contact,
        InfoField::Parameter,
        InfoField::Resource,
    ],
    formats: vec![
        (InfoField::Effective, FormatRule::timestamp()),
        (InfoField::Onset, FormatRule::timestamp()),
        (InfoField::Expires, FormatRule::timestamp()),
        (
            InfoField::Headline,
            FormatRule::new(
                &format!(r"(?s)^.{{1,{HEADLINE_MAX_CHARS}}}$"),
                format!("1 to {HEADLINE_MAX_CHARS} characters"),
            ),
        ),
    ],
    vocabularies: vec![
        (InfoField::Category, CATEGORY),
        (InfoField::ResponseType, RESPONSE_TYPE),
        (InfoField::Urgency, URGENCY),
        (InfoField::Severity, SEVERITY),
        (InfoField::Certainty, CERTAINTY),
    ],
});

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partition<F: Field + std::fmt::Debug>(table: &RuleTable<F>) {
        for field in F::ALL {
            let required = table.required.contains(field);
            let optional = table.optional.contains(field);
            assert!(required != optional, "{field:?} must be in exactly one list");
        }
    }

    #[test]
    fn every_field_is_either_required_or_optional() {
        assert_partition(&*ALERT_RULES);
        assert_partition(&*INFO_RULES);
    }

    #[test]
    fn timestamp_rule_needs_offset_and_real_instant() {
        let rule = ALERT_RULES.format(AlertField::Sent).unwrap();
        assert!(rule.is_match("2024-01-01T00:00:00+08:00"));
        assert!(rule.is_match("2024-01-01T00:00:00-05:00"));
        assert!(!rule.is_match("2024-01-01T00:00:00"));
        assert!(!rule.is_match("2024-01-01T00:00:00Z"));
        assert!(!rule.is_match("2024-01-01T00:00:00,08:00"));
        assert!(!rule.is_match("2024-13-41T00:00:00+08:00"));
        assert!(!rule.is_match("x2024-01-01T00:00:00+08:00"));
    }

    #[test]
    fn headline_counts_characters_not_bytes() {
        let rule = INFO_RULES.format(InfoField::Headline).unwrap();
        assert!(rule.is_match("颱風警報颱風警報颱風警報颱風警報颱風警報"));
        assert!(!rule.is_match("颱風警報颱風警報颱風警報颱風警報颱風警報報"));
    }

    #[test]
    fn headline_may_span_lines() {
        let rule = INFO_RULES.format(InfoField::Headline).unwrap();
        assert!(rule.is_match("Heavy\nrain"));
        assert!(!rule.is_match("Heavy\nrain\nacross the whole\nnorth"));
        assert_eq!(rule.expected(), "1 to 20 characters");
    }

    #[test]
    fn unlisted_fields_are_required() {
        let table = RuleTable {
            required: &[AlertField::Sender],
            optional: &[AlertField::Note],
            formats: Vec::new(),
            vocabularies: Vec::new(),
        };
        assert!(table.is_required(AlertField::Sender));
        assert!(table.is_required(AlertField::Identifier));
        assert!(!table.is_required(AlertField::Note));
    }

    #[test]
    fn numeric_rules() {
        assert!(size_rule().is_match("24680"));
        assert!(!size_rule().is_match("1.5MB"));
        assert!(!size_rule().is_match("-1"));
        assert!(elevation_rule().is_match("-20"));
        assert!(elevation_rule().is_match("3000"));
        assert!(!elevation_rule().is_match("high"));
    }

    #[test]
    fn vocabularies_are_case_sensitive() {
        let scope = ALERT_RULES.vocabulary(AlertField::Scope).unwrap();
        assert!(scope.contains(&"Private"));
        assert!(!scope.contains(&"private"));
        assert!(ALERT_RULES.vocabulary(AlertField::Sender).is_none());
    }
}
