use crate::error::IngestError;
use crate::models::{Alert, Area, Info, Resource, ValuePair};
use roxmltree::Node;
use sha2::{Digest, Sha256};

const ALERT: &str = "alert";

pub fn compute_sha256_hex(xml: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(xml.as_bytes());
    let bytes = hasher.finalize();
    hex::encode(bytes)
}

/// Child elements matched by local name, whatever their namespace prefix.
fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

fn find_element<'a, 'input: 'a>(node: Node<'a, 'input>, name: &'static str) -> Option<Node<'a, 'input>> {
    children(node, name).next()
}

// All descendant text, trimmed; empty text counts as absent.
fn text_of(node: Node) -> Option<String> {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn get_text(node: Node, name: &'static str) -> Option<String> {
    find_element(node, name).and_then(text_of)
}

fn get_all(node: Node, name: &'static str) -> Vec<String> {
    children(node, name).filter_map(text_of).collect()
}

fn parse_pair(node: Node) -> ValuePair {
    ValuePair::new(
        get_text(node, "valueName").unwrap_or_default(),
        get_text(node, "value").unwrap_or_default(),
    )
}

fn parse_resource(node: Node) -> Resource {
    Resource {
        resource_desc: get_text(node, "resourceDesc").unwrap_or_default(),
        mime_type: get_text(node, "mimeType").unwrap_or_default(),
        size: get_text(node, "size"),
        uri: get_text(node, "uri"),
        deref_uri: get_text(node, "derefUri"),
        digest: get_text(node, "digest"),
    }
}

fn parse_area(node: Node) -> Area {
    let polygon = get_all(node, "polygon");
    // altitude and ceiling only mean something alongside a polygon
    let (altitude, ceiling) = if polygon.is_empty() {
        (None, None)
    } else {
        (get_text(node, "altitude"), get_text(node, "ceiling"))
    };

    Area {
        area_desc: get_text(node, "areaDesc").unwrap_or_default(),
        polygon,
        circle: get_all(node, "circle"),
        geocode: children(node, "geocode").map(parse_pair).collect(),
        altitude,
        ceiling,
    }
}

fn parse_info(node: Node) -> Info {
    Info {
        language: get_text(node, "language").unwrap_or_default(),
        category: get_all(node, "category"),
        event: get_text(node, "event").unwrap_or_default(),
        response_type: get_all(node, "responseType"),
        urgency: get_text(node, "urgency").unwrap_or_default(),
        severity: get_text(node, "severity").unwrap_or_default(),
        certainty: get_text(node, "certainty").unwrap_or_default(),
        audience: get_text(node, "audience"),
        event_code: children(node, "eventCode").map(parse_pair).collect(),
        effective: get_text(node, "effective"),
        onset: get_text(node, "onset"),
        expires: get_text(node, "expires"),
        sender_name: get_text(node, "senderName"),
        headline: get_text(node, "headline"),
        description: get_text(node, "description"),
        instruction: get_text(node, "instruction"),
        web: get_text(node, "web"),
        contact: get_text(node, "contact"),
        parameter: children(node, "parameter").map(parse_pair).collect(),
        resource: children(node, "resource").map(parse_resource).collect(),
        area: children(node, "area").map(parse_area).collect(),
    }
}

/// Parse CAP markup into an [`Alert`].
///
/// Elements are matched by local name only, so any namespace (or none) is
/// accepted on the root and its descendants. Missing elements leave the
/// corresponding field empty; deciding whether that is acceptable is the
/// validator's job.
pub fn parse_alert(xml: &str) -> Result<Alert, IngestError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();

    let root_name = root.tag_name().name();
    if !root_name.eq_ignore_ascii_case(ALERT) {
        return Err(IngestError::UnexpectedRoot {
            found: root_name.to_string(),
        });
    }

    let alert = Alert {
        xmlns: root.tag_name().namespace().map(str::to_string),
        identifier: get_text(root, "identifier").unwrap_or_default(),
        sender: get_text(root, "sender").unwrap_or_default(),
        sent: get_text(root, "sent").unwrap_or_default(),
        status: get_text(root, "status").unwrap_or_default(),
        msg_type: get_text(root, "msgType").unwrap_or_default(),
        source: get_text(root, "source"),
        scope: get_text(root, "scope").unwrap_or_default(),
        restriction: get_text(root, "restriction"),
        addresses: get_text(root, "addresses"),
        code: get_all(root, "code"),
        note: get_text(root, "note"),
        references: get_text(root, "references"),
        incidents: get_text(root, "incidents"),
        info: children(root, "info").map(parse_info).collect(),
    };

    tracing::debug!(identifier = %alert.identifier, infos = alert.info.len(), "alert parsed");
    Ok(alert)
}
