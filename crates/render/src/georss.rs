//! GeoRSS (Atom) rendering of one alert or a feed of alerts.

use crate::geocode::{GeocodeResolver, Representation};
use crate::xml::{attribute, element, optional, wrap};
use crate::RenderError;
use cap_alert_core::{parse_alert, Alert, Area};
use std::path::Path;

const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
const GEORSS_NAMESPACE: &str = "http://www.georss.org/georss";
const GML_NAMESPACE: &str = "http://www.opengis.net/gml";

/// CAP `lat,lon` pairs to GeoRSS `lat lon` pairs.
fn points(pairs: &str) -> String {
    pairs
        .split_whitespace()
        .map(|pair| pair.replace(',', " "))
        .collect::<Vec<_>>()
        .join(" ")
}

// "lat,lon radius" with the radius in kilometres; georss:radius is in metres
fn circle(circle: &str) -> String {
    let mut parts = circle.split_whitespace();
    let centre = element("georss:point", &points(parts.next().unwrap_or_default()));
    let radius = parts
        .next()
        .and_then(|r| r.parse::<f64>().ok())
        .map(|km| element("georss:radius", &(km * 1000.0).to_string()))
        .unwrap_or_default();
    centre + &radius
}

fn area_shapes(area: &Area, resolver: &dyn GeocodeResolver) -> String {
    let boundaries: String = area
        .geocode
        .iter()
        .filter_map(|g| resolver.resolve(g.value(), Representation::Gml))
        .collect();

    [
        area.circle.iter().map(|c| circle(c)).collect::<String>(),
        area.polygon
            .iter()
            .map(|p| element("georss:polygon", &points(p)))
            .collect(),
        if boundaries.is_empty() {
            String::new()
        } else {
            wrap("georss:where", &boundaries)
        },
    ]
    .concat()
}

/// Render the alert as an Atom entry carrying its areas as GeoRSS shapes.
/// Title and summary come from the first info block.
pub fn to_georss_item(alert: &Alert, resolver: &dyn GeocodeResolver) -> String {
    let first = alert.info.first();
    let shapes: String = alert
        .info
        .iter()
        .flat_map(|info| info.area.iter())
        .map(|area| area_shapes(area, resolver))
        .collect();

    let inner = [
        element("id", &alert.identifier),
        element("title", first.map(|i| i.event.as_str()).unwrap_or_default()),
        element("updated", &alert.sent),
        wrap("author", &element("name", &alert.sender)),
        optional("summary", first.and_then(|i| i.description.as_deref())),
        shapes,
    ]
    .concat();
    wrap("entry", &inner)
}

/// A GeoRSS feed over several alerts.
#[derive(Debug, Clone)]
pub struct Feed {
    pub id: String,
    pub title: String,
    pub updated: String,
    pub name: String,
    pub link: String,
    pub alerts: Vec<Alert>,
}

impl Feed {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        updated: impl Into<String>,
        name: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            updated: updated.into(),
            name: name.into(),
            link: link.into(),
            alerts: Vec::new(),
        }
    }

    pub fn push(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    /// Read and ingest a CAP file, appending it to the feed.
    pub fn load_file(&mut self, path: &Path) -> Result<(), RenderError> {
        let xml = std::fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.push(parse_alert(&xml)?);
        Ok(())
    }

    pub fn to_georss(&self, resolver: &dyn GeocodeResolver) -> String {
        let entries: String = self
            .alerts
            .iter()
            .map(|a| to_georss_item(a, resolver))
            .collect();
        let link = if self.link.is_empty() {
            String::new()
        } else {
            format!("<link href=\"{}\"/>", attribute(&self.link))
        };

        let inner = [
            element("id", &self.id),
            element("title", &self.title),
            element("updated", &self.updated),
            wrap("author", &element("name", &self.name)),
            link,
            entries,
        ]
        .concat();

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <feed xmlns=\"{ATOM_NAMESPACE}\" xmlns:georss=\"{GEORSS_NAMESPACE}\" xmlns:gml=\"{GML_NAMESPACE}\">{inner}</feed>\n"
        )
    }
}
