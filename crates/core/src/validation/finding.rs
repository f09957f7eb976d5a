use serde::Serialize;
use std::fmt;

/// Whether a finding prevents the document from being accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// Must be corrected before the alert is accepted
    Blocking,
    /// Informational only
    Advisory,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Blocking => "Blocking",
            Self::Advisory => "Advisory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FindingKind {
    /// The document cannot be traversed at all.
    Structural,
    /// A required value is absent or empty.
    Missing,
    /// A present value does not have the expected shape.
    Format,
    /// A present value is outside its closed vocabulary.
    Vocabulary,
    /// Two timestamps are out of order.
    Ordering,
    /// A value is present where the message type forbids it.
    Forbidden,
    /// The alert is no longer in effect.
    Expired,
}

impl FindingKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Expired => Severity::Advisory,
            _ => Severity::Blocking,
        }
    }
}

/// One validation result item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Field or structural tag the finding is about.
    pub subject: String,
    pub message: String,
    pub kind: FindingKind,
    pub severity: Severity,
    /// 1-based info block index, set only when the alert has several.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_index: Option<usize>,
}

impl Finding {
    pub fn new(kind: FindingKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            kind,
            severity: kind.severity(),
            info_index: None,
        }
    }

    pub fn structural(subject: &str, message: impl Into<String>) -> Self {
        Self::new(FindingKind::Structural, subject, message)
    }

    pub fn missing(subject: &str) -> Self {
        Self::new(FindingKind::Missing, subject, format!("{subject} must be present"))
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Blocking
    }

    /// Attribute the finding to an info block, prefixing its message.
    pub(crate) fn in_info(mut self, index: usize) -> Self {
        self.message = format!("Info #{index}: {}", self.message);
        self.info_index = Some(index);
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}

/// True when no finding blocks acceptance.
pub fn accepted(findings: &[Finding]) -> bool {
    !findings.iter().any(Finding::is_blocking)
}
