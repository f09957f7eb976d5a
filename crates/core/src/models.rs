//! CAP document model.
//!
//! The tree mirrors the markup: one [`Alert`] envelope owning its [`Info`]
//! blocks, each owning its [`Resource`]s and [`Area`]s. Required scalar
//! fields are plain strings where an empty string means "absent"; optional
//! scalars are `Option<String>` and are never `Some("")` after ingestion.

use serde::{Deserialize, Serialize};

/// Root envelope of one alert message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Namespace of the source root element, reproduced when rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xmlns: Option<String>,
    pub identifier: String,
    pub sender: String,
    /// Timestamp, `YYYY-MM-DDTHH:MM:SS±HH:MM`
    pub sent: String,
    pub status: String,
    pub msg_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restriction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Space separated `sender,identifier,sent` triplets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incidents: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info: Vec<Info>,
}

impl Alert {
    /// Iterate the whitespace separated reference triplets, in source order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.references
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
    }
}

/// One language/category specific description block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// Empty string when the source carries no language.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<String>,
    pub event: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response_type: Vec<String>,
    pub urgency: String,
    pub severity: String,
    pub certainty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_code: Vec<EventCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub area: Vec<Area>,
}

/// Geographic impact region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub area_desc: String,
    /// Coordinate-pair strings, `lat,lon lat,lon ...`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub polygon: Vec<String>,
    /// Centre and radius strings, `lat,lon radius`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub circle: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geocode: Vec<Geocode>,
    /// Integer feet, as written in the source; checked by the validator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<String>,
}

impl Area {
    pub fn new(area_desc: impl Into<String>) -> Self {
        Self {
            area_desc: area_desc.into(),
            ..Self::default()
        }
    }
}

/// Supplementary file descriptor attached to an info block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub resource_desc: String,
    pub mime_type: String,
    /// Byte count, as written in the source; checked by the validator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deref_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Immutable `(valueName, value)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePair {
    value_name: String,
    value: String,
}

impl ValuePair {
    pub fn new(value_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value_name: value_name.into(),
            value: value.into(),
        }
    }

    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Coded area reference, resolved externally to a boundary shape.
pub type Geocode = ValuePair;
/// System-specific event code.
pub type EventCode = ValuePair;
/// System-specific additional parameter.
pub type Parameter = ValuePair;
