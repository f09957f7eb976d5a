//! Closed sets of field identifiers with their accessors.
//!
//! The rule catalog is keyed by these identifiers and the validator walks
//! them in markup order, so no field is ever looked up by name at runtime.

use crate::models::{Alert, Info};

/// Borrowed view of one field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
    /// Nested structures, represented by their count.
    Nested(usize),
}

impl<'a> FieldValue<'a> {
    fn optional(value: &'a Option<String>) -> Self {
        FieldValue::Text(value.as_deref().unwrap_or_default())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Nested(count) => *count == 0,
        }
    }

    /// The value format and vocabulary rules are checked against. Lists are
    /// represented by their first entry.
    pub fn representative(&self) -> Option<&'a str> {
        match *self {
            FieldValue::Text(text) if !text.is_empty() => Some(text),
            FieldValue::List(items) => items.first().map(String::as_str),
            _ => None,
        }
    }
}

/// A field identifier of one scope of the document.
pub trait Field: Copy + Eq + 'static {
    type Entity;

    /// Every field of the scope, in markup order.
    const ALL: &'static [Self];

    /// Element name as it appears in markup.
    fn name(self) -> &'static str;

    fn value(self, entity: &Self::Entity) -> FieldValue<'_>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertField {
    Identifier,
    Sender,
    Sent,
    Status,
    MsgType,
    Source,
    Scope,
    Restriction,
    Addresses,
    Code,
    Note,
    References,
    Incidents,
    Info,
}

impl Field for AlertField {
    type Entity = Alert;

    const ALL: &'static [Self] = &[
        AlertField::Identifier,
        AlertField::Sender,
        AlertField::Sent,
        AlertField::Status,
        AlertField::MsgType,
        AlertField::Source,
        AlertField::Scope,
        AlertField::Restriction,
        AlertField::Addresses,
        AlertField::Code,
        AlertField::Note,
        AlertField::References,
        AlertField::Incidents,
        AlertField::Info,
    ];

    fn name(self) -> &'static str {
        match self {
            AlertField::Identifier => "identifier",
            AlertField::Sender => "sender",
            AlertField::Sent => "sent",
            AlertField::Status => "status",
            AlertField::MsgType => "msgType",
            AlertField::Source => "source",
            AlertField::Scope => "scope",
            AlertField::Restriction => "restriction",
            AlertField::Addresses => "addresses",
            AlertField::Code => "code",
            AlertField::Note => "note",
            AlertField::References => "references",
            AlertField::Incidents => "incidents",
            AlertField::Info => "info",
        }
    }

    fn value(self, alert: &Alert) -> FieldValue<'_> {
        match self {
            AlertField::Identifier => FieldValue::Text(&alert.identifier),
            AlertField::Sender => FieldValue::Text(&alert.sender),
            AlertField::Sent => FieldValue::Text(&alert.sent),
            AlertField::Status => FieldValue::Text(&alert.status),
            AlertField::MsgType => FieldValue::Text(&alert.msg_type),
            AlertField::Source => FieldValue::optional(&alert.source),
            AlertField::Scope => FieldValue::Text(&alert.scope),
            AlertField::Restriction => FieldValue::optional(&alert.restriction),
            AlertField::Addresses => FieldValue::optional(&alert.addresses),
            AlertField::Code => FieldValue::List(&alert.code),
            AlertField::Note => FieldValue::optional(&alert.note),
            AlertField::References => FieldValue::optional(&alert.references),
            AlertField::Incidents => FieldValue::optional(&alert.incidents),
            AlertField::Info => FieldValue::Nested(alert.info.len()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoField {
    Language,
    Category,
    Event,
    ResponseType,
    Urgency,
    Severity,
    Certainty,
    Audience,
    EventCode,
    Effective,
    Onset,
    Expires,
    SenderName,
    Headline,
    Description,
    Instruction,
    Web,
    Contact,
    Parameter,
    Resource,
    Area,
}

impl Field for InfoField {
    type Entity = Info;

    const ALL: &'static [Self] = &[
        InfoField::Language,
        InfoField::Category,
        InfoField::Event,
        InfoField::ResponseType,
        InfoField::Urgency,
        InfoField::Severity,
        InfoField::Certainty,
        InfoField::Audience,
        InfoField::EventCode,
        InfoField::Effective,
        InfoField::Onset,
        InfoField::Expires,
        InfoField::SenderName,
        InfoField::Headline,
        InfoField::Description,
        InfoField::Instruction,
        InfoField::Web,
        InfoField::Contact,
        InfoField::Parameter,
        InfoField::Resource,
        InfoField::Area,
    ];

    fn name(self) -> &'static str {
        match self {
            InfoField::Language => "language",
            InfoField::Category => "category",
            InfoField::Event => "event",
            InfoField::ResponseType => "responseType",
            InfoField::Urgency => "urgency",
            InfoField::Severity => "severity",
            InfoField::Certainty => "certainty",
            InfoField::Audience => "audience",
            InfoField::EventCode => "eventCode",
            InfoField::Effective => "effective",
            InfoField::Onset => "onset",
            InfoField::Expires => "expires",
            InfoField::SenderName => "senderName",
            InfoField::Headline => "headline",
            InfoField::Description => "description",
            InfoField::Instruction => "instruction",
            InfoField::Web => "web",
            InfoField::Contact => "contact",
            InfoField::Parameter => "parameter",
            InfoField::Resource => "resource",
            InfoField::Area => "area",
        }
    }

    fn value(self, info: &Info) -> FieldValue<'_> {
        match self {
            InfoField::Language => FieldValue::Text(&info.language),
            InfoField::Category => FieldValue::List(&info.category),
            InfoField::Event => FieldValue::Text(&info.event),
            InfoField::ResponseType => FieldValue::List(&info.response_type),
            InfoField::Urgency => FieldValue::Text(&info.urgency),
            InfoField::Severity => FieldValue::Text(&info.severity),
            InfoField::Certainty => FieldValue::Text(&info.certainty),
            InfoField::Audience => FieldValue::optional(&info.audience),
            InfoField::EventCode => FieldValue::Nested(info.event_code.len()),
            InfoField::Effective => FieldValue::optional(&info.effective),
            InfoField::Onset => FieldValue::optional(&info.onset),
            InfoField::Expires => FieldValue::optional(&info.expires),
            InfoField::SenderName => FieldValue::optional(&info.sender_name),
            InfoField::Headline => FieldValue::optional(&info.headline),
            InfoField::Description => FieldValue::optional(&info.description),
            InfoField::Instruction => FieldValue::optional(&info.instruction),
            InfoField::Web => FieldValue::optional(&info.web),
            InfoField::Contact => FieldValue::optional(&info.contact),
            InfoField::Parameter => FieldValue::Nested(info.parameter.len()),
            InfoField::Resource => FieldValue::Nested(info.resource.len()),
            InfoField::Area => FieldValue::Nested(info.area.len()),
        }
    }
}
