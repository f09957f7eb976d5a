use super::catalog::{
    elevation_rule, size_rule, timestamp_rule, FormatRule, RuleTable, ALERT_RULES, INFO_RULES,
    MSG_TYPE, MSG_TYPE_INITIAL, SCOPE_PRIVATE, SCOPE_RESTRICTED,
};
use super::fields::{Field, FieldValue};
use super::finding::{Finding, FindingKind};
use crate::models::{Alert, Area, Info, Resource, ValuePair};
use chrono::{DateTime, FixedOffset, Utc};

pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

/// A timestamp that passes its format rule, parsed.
fn well_formed_timestamp(value: Option<&str>) -> Option<DateTime<FixedOffset>> {
    value
        .filter(|v| timestamp_rule().is_match(v))
        .and_then(parse_timestamp)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn format_finding(name: &str, text: &str, rule: &FormatRule) -> Finding {
    Finding::new(
        FindingKind::Format,
        name,
        format!(
            "{name} '{text}' has an invalid format, expected {}",
            rule.expected()
        ),
    )
}

/// A format finding for an optional value that is present but malformed.
fn check_format(name: &str, value: Option<&str>, rule: &FormatRule, findings: &mut Vec<Finding>) {
    if let Some(text) = value.filter(|v| !v.is_empty()) {
        if !rule.is_match(text) {
            findings.push(format_finding(name, text, rule));
        }
    }
}

/// Presence, format and vocabulary of every field of one scope.
fn check_fields<F: Field>(table: &RuleTable<F>, entity: &F::Entity, findings: &mut Vec<Finding>) {
    for &field in F::ALL {
        let name = field.name();
        let value = field.value(entity);

        if value.is_empty() {
            if table.is_required(field) {
                findings.push(match value {
                    FieldValue::Nested(_) => Finding::new(
                        FindingKind::Missing,
                        name,
                        format!("at least one {name} is required"),
                    ),
                    _ => Finding::missing(name),
                });
            }
            continue;
        }

        let Some(text) = value.representative() else {
            continue;
        };

        if let Some(rule) = table.format(field) {
            if !rule.is_match(text) {
                findings.push(format_finding(name, text, rule));
                // no vocabulary or ordering noise on top of a malformed value
                continue;
            }
        }

        if let Some(terms) = table.vocabulary(field) {
            if !terms.contains(&text) {
                findings.push(Finding::new(
                    FindingKind::Vocabulary,
                    name,
                    format!("{name} '{text}' must be one of: {}", terms.join(", ")),
                ));
            }
        }
    }
}

fn check_references(alert: &Alert, findings: &mut Vec<Finding>) {
    let msg_type = alert.msg_type.as_str();
    // an unknown msgType is already reported; its reference rules are undefined
    if !MSG_TYPE.contains(&msg_type) {
        return;
    }

    if msg_type == MSG_TYPE_INITIAL {
        if !is_blank(&alert.references) {
            findings.push(Finding::new(
                FindingKind::Forbidden,
                "references",
                format!("references must not be present when msgType is {MSG_TYPE_INITIAL}"),
            ));
        }
        return;
    }

    if is_blank(&alert.references) {
        findings.push(Finding::new(
            FindingKind::Missing,
            "references",
            format!("references must be present when msgType is {msg_type}"),
        ));
        return;
    }

    for (index, triplet) in alert.references().enumerate() {
        check_reference(index + 1, triplet, findings);
    }
}

fn check_reference(position: usize, triplet: &str, findings: &mut Vec<Finding>) {
    let malformed = |detail: String| {
        Finding::new(
            FindingKind::Format,
            "references",
            format!("reference #{position} '{triplet}' {detail}"),
        )
    };

    let parts: Vec<&str> = triplet.split(',').collect();
    let [sender, identifier, sent] = parts.as_slice() else {
        findings.push(malformed(format!(
            "must be sender,identifier,sent with exactly two commas, found {}",
            parts.len() - 1
        )));
        return;
    };

    if sender.is_empty() {
        findings.push(malformed("is missing its sender".to_string()));
    }
    if identifier.is_empty() {
        findings.push(malformed("is missing its identifier".to_string()));
    }
    if sent.is_empty() {
        findings.push(malformed("is missing its sent time".to_string()));
    } else if !timestamp_rule().is_match(sent) {
        findings.push(malformed(format!(
            "has an invalid sent time, expected {}",
            timestamp_rule().expected()
        )));
    }
}

fn check_scope(alert: &Alert, findings: &mut Vec<Finding>) {
    let (subject, missing) = match alert.scope.as_str() {
        SCOPE_RESTRICTED => ("restriction", is_blank(&alert.restriction)),
        SCOPE_PRIVATE => ("addresses", is_blank(&alert.addresses)),
        _ => return,
    };
    if missing {
        findings.push(Finding::new(
            FindingKind::Missing,
            subject,
            format!("{subject} must be present when scope is {}", alert.scope),
        ));
    }
}

fn check_expiry(info: &Info, now: DateTime<Utc>, findings: &mut Vec<Finding>) {
    let Some(expires) = well_formed_timestamp(info.expires.as_deref()) else {
        return;
    };

    for (bound_name, bound) in [("onset", &info.onset), ("effective", &info.effective)] {
        if let Some(bound) = well_formed_timestamp(bound.as_deref()) {
            if expires < bound {
                findings.push(Finding::new(
                    FindingKind::Ordering,
                    "expires",
                    format!("expires must not be earlier than {bound_name}"),
                ));
            }
        }
    }

    if expires.with_timezone(&Utc) < now {
        findings.push(Finding::new(
            FindingKind::Expired,
            "expires",
            format!("alert already expired at {}", expires.to_rfc3339()),
        ));
    }
}

fn check_pairs(subject: &str, pairs: &[ValuePair], findings: &mut Vec<Finding>) {
    for pair in pairs {
        if pair.value_name().is_empty() {
            findings.push(Finding::new(
                FindingKind::Missing,
                subject,
                format!("{subject} is missing valueName"),
            ));
        }
        if pair.value().is_empty() {
            findings.push(Finding::new(
                FindingKind::Missing,
                subject,
                format!("{subject} is missing value"),
            ));
        }
    }
}

fn check_resource(resource: &Resource, findings: &mut Vec<Finding>) {
    if resource.resource_desc.is_empty() {
        findings.push(Finding::new(
            FindingKind::Missing,
            "resource",
            "resource is missing resourceDesc",
        ));
    }
    if resource.mime_type.is_empty() {
        findings.push(Finding::new(
            FindingKind::Missing,
            "resource",
            "resource is missing mimeType",
        ));
    }
    check_format("size", resource.size.as_deref(), size_rule(), findings);
}

fn check_area(area: &Area, findings: &mut Vec<Finding>) {
    if area.area_desc.is_empty() {
        findings.push(Finding::missing("areaDesc"));
    }
    check_format("altitude", area.altitude.as_deref(), elevation_rule(), findings);
    check_format("ceiling", area.ceiling.as_deref(), elevation_rule(), findings);

    let label = if area.area_desc.is_empty() {
        "(no areaDesc)"
    } else {
        area.area_desc.as_str()
    };
    for geocode in &area.geocode {
        if geocode.value_name().is_empty() {
            findings.push(Finding::new(
                FindingKind::Missing,
                "geocode",
                format!("geocode in area '{label}' is missing valueName"),
            ));
        }
        if geocode.value().is_empty() {
            findings.push(Finding::new(
                FindingKind::Missing,
                "geocode",
                format!("geocode in area '{label}' is missing value"),
            ));
        }
    }
}

fn check_info(info: &Info, now: DateTime<Utc>) -> Vec<Finding> {
    let mut findings = Vec::new();

    check_fields(&*INFO_RULES, info, &mut findings);
    check_expiry(info, now, &mut findings);
    check_pairs("eventCode", &info.event_code, &mut findings);
    check_pairs("parameter", &info.parameter, &mut findings);
    for resource in &info.resource {
        check_resource(resource, &mut findings);
    }
    for area in &info.area {
        check_area(area, &mut findings);
    }

    findings
}

/// Run every rule against the alert, collecting all findings.
pub(crate) fn check_alert(alert: &Alert, now: DateTime<Utc>) -> Vec<Finding> {
    let mut findings = Vec::new();

    check_fields(&*ALERT_RULES, alert, &mut findings);
    check_references(alert, &mut findings);
    check_scope(alert, &mut findings);

    let numbered = alert.info.len() > 1;
    for (index, info) in alert.info.iter().enumerate() {
        let info_findings = check_info(info, now);
        if numbered {
            findings.extend(info_findings.into_iter().map(|f| f.in_info(index + 1)));
        } else {
            findings.extend(info_findings);
        }
    }

    findings
}
