//! CAP markup, the structured interchange representation.
//!
//! The output re-ingests through [`cap_alert_core::parse_alert`] into an equal
//! model, with one exception inherited from ingestion: `altitude` and
//! `ceiling` survive only on areas that carry a polygon.

use crate::xml::{attribute, element, optional, repeated, wrap};
use cap_alert_core::{Alert, Area, Info, Resource, ValuePair};

pub const CAP_NAMESPACE: &str = "urn:oasis:names:tc:emergency:cap:1.2";

fn value_pair(tag: &str, pair: &ValuePair) -> String {
    let inner = element("valueName", pair.value_name()) + &element("value", pair.value());
    wrap(tag, &inner)
}

fn value_pairs(tag: &str, pairs: &[ValuePair]) -> String {
    pairs.iter().map(|p| value_pair(tag, p)).collect()
}

fn resource(resource: &Resource) -> String {
    let inner = [
        element("resourceDesc", &resource.resource_desc),
        element("mimeType", &resource.mime_type),
        optional("size", resource.size.as_deref()),
        optional("uri", resource.uri.as_deref()),
        optional("derefUri", resource.deref_uri.as_deref()),
        optional("digest", resource.digest.as_deref()),
    ]
    .concat();
    wrap("resource", &inner)
}

fn area(area: &Area) -> String {
    let inner = [
        element("areaDesc", &area.area_desc),
        repeated("polygon", &area.polygon),
        repeated("circle", &area.circle),
        value_pairs("geocode", &area.geocode),
        optional("altitude", area.altitude.as_deref()),
        optional("ceiling", area.ceiling.as_deref()),
    ]
    .concat();
    wrap("area", &inner)
}

fn info(info: &Info) -> String {
    let inner = [
        optional("language", Some(info.language.as_str())),
        repeated("category", &info.category),
        element("event", &info.event),
        repeated("responseType", &info.response_type),
        element("urgency", &info.urgency),
        element("severity", &info.severity),
        element("certainty", &info.certainty),
        optional("audience", info.audience.as_deref()),
        value_pairs("eventCode", &info.event_code),
        optional("effective", info.effective.as_deref()),
        optional("onset", info.onset.as_deref()),
        optional("expires", info.expires.as_deref()),
        optional("senderName", info.sender_name.as_deref()),
        optional("headline", info.headline.as_deref()),
        optional("description", info.description.as_deref()),
        optional("instruction", info.instruction.as_deref()),
        optional("web", info.web.as_deref()),
        optional("contact", info.contact.as_deref()),
        value_pairs("parameter", &info.parameter),
        info.resource.iter().map(resource).collect(),
        info.area.iter().map(area).collect(),
    ]
    .concat();
    wrap("info", &inner)
}

/// Render the alert as CAP markup.
pub fn to_cap(alert: &Alert) -> String {
    let body = [
        element("identifier", &alert.identifier),
        element("sender", &alert.sender),
        element("sent", &alert.sent),
        element("status", &alert.status),
        element("msgType", &alert.msg_type),
        optional("source", alert.source.as_deref()),
        element("scope", &alert.scope),
        optional("restriction", alert.restriction.as_deref()),
        optional("addresses", alert.addresses.as_deref()),
        repeated("code", &alert.code),
        optional("note", alert.note.as_deref()),
        optional("references", alert.references.as_deref()),
        optional("incidents", alert.incidents.as_deref()),
        alert.info.iter().map(info).collect(),
    ]
    .concat();

    let namespace = alert.xmlns.as_deref().unwrap_or(CAP_NAMESPACE);
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<alert xmlns=\"{}\">{body}</alert>\n",
        attribute(namespace)
    )
}
