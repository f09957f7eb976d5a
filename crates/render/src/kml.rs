//! KML rendering for map viewers.

use crate::geocode::{GeocodeResolver, Representation};
use crate::xml::{attribute, element, optional, wrap};
use cap_alert_core::{Alert, Area, Info, Resource};

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// CAP `lat,lon` pairs to KML `lon,lat,0` tuples.
fn coordinates(points: &str) -> String {
    points
        .split_whitespace()
        .map(|pair| match pair.split_once(',') {
            Some((lat, lon)) => format!("{lon},{lat},0"),
            None => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn data(name: &str, value: &str) -> String {
    format!(
        "<Data name=\"{}\">{}</Data>",
        attribute(name),
        element("value", value)
    )
}

fn optional_data(name: &str, value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => data(name, value),
        _ => String::new(),
    }
}

fn extended_data(entries: &[String]) -> String {
    let inner = entries.concat();
    if inner.is_empty() {
        String::new()
    } else {
        wrap("ExtendedData", &inner)
    }
}

fn polygon(points: &str) -> String {
    format!(
        "<Polygon><outerBoundaryIs><LinearRing><coordinates>{}</coordinates></LinearRing></outerBoundaryIs></Polygon>",
        attribute(&coordinates(points))
    )
}

// "lat,lon radius": the centre becomes a point, the radius goes to ExtendedData
fn circle_centre(circle: &str) -> String {
    let centre = circle.split_whitespace().next().unwrap_or_default();
    format!(
        "<Point><coordinates>{}</coordinates></Point>",
        attribute(&coordinates(centre))
    )
}

fn placemark(area: &Area, resolver: &dyn GeocodeResolver) -> String {
    let geometries = [
        area.polygon.iter().map(|p| polygon(p)).collect::<String>(),
        area.circle.iter().map(|c| circle_centre(c)).collect(),
        area.geocode
            .iter()
            .filter_map(|g| resolver.resolve(g.value(), Representation::Kml))
            .collect(),
    ]
    .concat();
    let geometry = if geometries.is_empty() {
        String::new()
    } else {
        wrap("MultiGeometry", &geometries)
    };

    let circles: Vec<String> = area.circle.iter().map(|c| data("circle", c)).collect();
    let extended = extended_data(
        &[
            circles.concat(),
            optional_data("altitude", area.altitude.as_deref()),
            optional_data("ceiling", area.ceiling.as_deref()),
        ],
    );

    wrap(
        "Placemark",
        &[element("name", &area.area_desc), extended, geometry].concat(),
    )
}

fn resource_data(resource: &Resource) -> String {
    [
        data("resourceDesc", &resource.resource_desc),
        data("mimeType", &resource.mime_type),
        optional_data("size", resource.size.as_deref()),
        optional_data("uri", resource.uri.as_deref()),
        optional_data("derefUri", resource.deref_uri.as_deref()),
        optional_data("digest", resource.digest.as_deref()),
    ]
    .concat()
}

fn folder(info: &Info, resolver: &dyn GeocodeResolver) -> String {
    let extended = extended_data(&[
        optional_data("language", Some(info.language.as_str())),
        info.category.iter().map(|c| data("category", c)).collect(),
        info.response_type
            .iter()
            .map(|r| data("responseType", r))
            .collect(),
        data("urgency", &info.urgency),
        data("severity", &info.severity),
        data("certainty", &info.certainty),
        optional_data("audience", info.audience.as_deref()),
        info.event_code
            .iter()
            .map(|e| data(e.value_name(), e.value()))
            .collect(),
        optional_data("effective", info.effective.as_deref()),
        optional_data("onset", info.onset.as_deref()),
        optional_data("expires", info.expires.as_deref()),
        optional_data("senderName", info.sender_name.as_deref()),
        optional_data("headline", info.headline.as_deref()),
        optional_data("instruction", info.instruction.as_deref()),
        optional_data("web", info.web.as_deref()),
        optional_data("contact", info.contact.as_deref()),
        info.parameter
            .iter()
            .map(|p| data(p.value_name(), p.value()))
            .collect(),
        info.resource.iter().map(resource_data).collect(),
    ]);

    let inner = [
        element("name", &info.event),
        optional("description", info.description.as_deref()),
        extended,
        info.area.iter().map(|a| placemark(a, resolver)).collect(),
    ]
    .concat();
    wrap("Folder", &inner)
}

/// Render the alert as a KML document: alert fields as document data, one
/// folder per info block and one placemark per area.
pub fn to_kml(alert: &Alert, resolver: &dyn GeocodeResolver) -> String {
    let extended = extended_data(&[
        data("identifier", &alert.identifier),
        data("sender", &alert.sender),
        data("sent", &alert.sent),
        data("status", &alert.status),
        data("msgType", &alert.msg_type),
        optional_data("source", alert.source.as_deref()),
        data("scope", &alert.scope),
        optional_data("restriction", alert.restriction.as_deref()),
        optional_data("addresses", alert.addresses.as_deref()),
        alert.code.iter().map(|c| data("code", c)).collect(),
        optional_data("note", alert.note.as_deref()),
        optional_data("references", alert.references.as_deref()),
        optional_data("incidents", alert.incidents.as_deref()),
    ]);

    let document = [
        element("name", &alert.identifier),
        extended,
        alert.info.iter().map(|i| folder(i, resolver)).collect(),
    ]
    .concat();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<kml xmlns=\"{KML_NAMESPACE}\">{}</kml>\n",
        wrap("Document", &document)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_swap_to_lon_lat() {
        assert_eq!(
            coordinates("25.21,121.45 24.96,121.67"),
            "121.45,25.21,0 121.67,24.96,0"
        );
    }

    #[test]
    fn circle_centre_drops_radius() {
        assert_eq!(
            circle_centre("25.3,121.9 30"),
            "<Point><coordinates>121.9,25.3,0</coordinates></Point>"
        );
    }

    #[test]
    fn area_without_geometry_has_no_multigeometry() {
        let area = Area::new("Somewhere");
        let rendered = placemark(&area, &crate::NoopResolver);
        assert_eq!(rendered, "<Placemark><name>Somewhere</name></Placemark>");
    }
}
