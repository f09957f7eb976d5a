//! Errors raised while turning markup into a document model.

use thiserror::Error;

/// Structural failures of ingestion. Content problems are reported as
/// validation findings instead.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The text is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element is not an alert.
    #[error("root element must be alert, found {found}")]
    UnexpectedRoot { found: String },
}
