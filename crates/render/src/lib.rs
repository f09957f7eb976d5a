//! Renderers turning a CAP document model into other textual representations.
//!
//! Every renderer is a pure function of the model (plus a geocode resolver for
//! the geographic formats). Optional values that are empty produce no markup at
//! all and list order is reproduced as-is.

use std::path::PathBuf;
use thiserror::Error;

pub mod cap;
pub mod geocode;
pub mod georss;
pub mod json;
pub mod kml;
mod xml;

pub use cap::to_cap;
pub use geocode::{DirectoryResolver, GeocodeResolver, MapResolver, NoopResolver, Representation};
pub use georss::{to_georss_item, Feed};
pub use json::to_json;
pub use kml::to_kml;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize alert: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Ingest(#[from] cap_alert_core::IngestError),
}
