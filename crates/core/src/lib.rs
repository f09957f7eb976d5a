//! Common Alerting Protocol documents: model, ingestion and validation.

pub mod error;
pub mod models;
pub mod parsing;
pub mod validation;

pub use error::IngestError;
pub use models::{Alert, Area, EventCode, Geocode, Info, Parameter, Resource, ValuePair};
pub use parsing::parse_alert;
pub use validation::{validate, validate_at, validate_xml, Finding, FindingKind, Severity};
