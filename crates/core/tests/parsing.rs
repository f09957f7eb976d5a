//! Ingestion of CAP markup.

use cap_alert_core::{parse_alert, validate_xml, FindingKind, IngestError, ValuePair};

const TYPHOON: &str = include_str!("fixtures/typhoon.xml");

#[test]
fn test_fixture_populates_every_level() {
    let alert = parse_alert(TYPHOON).unwrap();

    assert_eq!(alert.xmlns.as_deref(), Some("urn:oasis:names:tc:emergency:cap:1.2"));
    assert_eq!(alert.sender, "weather@cwb.gov.tw");
    assert_eq!(alert.msg_type, "Update");
    assert_eq!(alert.code, vec!["IPAWSv1.0", "TWv1.0"]);
    assert_eq!(alert.source, None);
    assert_eq!(alert.references().count(), 1);

    let info = &alert.info[0];
    assert_eq!(info.language, "zh-TW");
    assert_eq!(info.category, vec!["Met", "Geo"]);
    assert_eq!(info.response_type, vec!["Shelter", "Monitor"]);
    assert_eq!(
        info.event_code,
        vec![ValuePair::new("profile:CAP-TWP:Event:1.0", "typhoon")]
    );
    assert_eq!(
        info.description.as_deref(),
        Some("Typhoon Gaemi is approaching & strengthening.")
    );
    assert_eq!(info.resource[0].size.as_deref(), Some("24680"));
    assert_eq!(info.resource[0].deref_uri, None);

    let taipei = &info.area[0];
    assert_eq!(taipei.area_desc, "臺北市");
    assert_eq!(taipei.altitude.as_deref(), Some("0"));
    assert_eq!(taipei.ceiling.as_deref(), Some("3000"));
    assert_eq!(taipei.geocode[0].value(), "63");

    let offshore = &info.area[1];
    assert_eq!(offshore.circle, vec!["25.3,121.9 30"]);
    assert!(offshore.polygon.is_empty());
}

#[test]
fn test_fixture_is_accepted() {
    let findings = validate_xml(TYPHOON);
    assert!(findings.is_empty(), "unexpected findings: {findings:?}");
}

#[test]
fn test_missing_language_is_empty_string() {
    let alert = parse_alert("<alert><info><event>Quake</event></info></alert>").unwrap();
    assert_eq!(alert.info[0].language, "");
    assert_eq!(alert.xmlns, None);
}

#[test]
fn test_blank_elements_are_absent() {
    let alert = parse_alert(
        "<alert><source>  </source><note/><code></code><code>X</code></alert>",
    )
    .unwrap();
    assert_eq!(alert.source, None);
    assert_eq!(alert.note, None);
    assert_eq!(alert.code, vec!["X"]);
}

#[test]
fn test_malformed_markup_is_an_error() {
    let err = parse_alert("<alert><identifier>1</alert>").unwrap_err();
    assert!(matches!(err, IngestError::Xml(_)));
}

#[test]
fn test_wrong_root_short_circuits_validation() {
    let findings = validate_xml("<feed><id>1</id></feed>");
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, FindingKind::Structural);
    assert_eq!(findings[0].subject, "alert");
}

#[test]
fn test_bad_numbers_accumulate_with_other_findings() {
    let xml = r#"<alert xmlns="urn:oasis:names:tc:emergency:cap:1.2">
  <identifier>cap-002</identifier>
  <sent>2024-01-01T00:00:00+08:00</sent>
  <status>Bogus</status>
  <msgType>Alert</msgType>
  <scope>Public</scope>
  <info>
    <category>Met</category>
    <event>Rain</event>
    <urgency>Expected</urgency>
    <severity>Minor</severity>
    <certainty>Likely</certainty>
    <expires>2099-01-01T00:00:00+08:00</expires>
    <resource>
      <resourceDesc>radar</resourceDesc>
      <mimeType>image/png</mimeType>
      <size>1.5MB</size>
    </resource>
    <area>
      <areaDesc>Hsinchu</areaDesc>
      <polygon>24.8,120.9 24.9,121.0 24.8,121.1 24.8,120.9</polygon>
      <altitude>low</altitude>
    </area>
  </info>
</alert>"#;
    let findings = validate_xml(xml);
    let subjects: Vec<_> = findings.iter().map(|f| f.subject.as_str()).collect();
    assert_eq!(subjects, ["sender", "status", "size", "altitude"]);
    assert_eq!(findings[0].kind, FindingKind::Missing);
    assert_eq!(findings[1].kind, FindingKind::Vocabulary);
    assert_eq!(findings[2].kind, FindingKind::Format);
    assert_eq!(findings[3].kind, FindingKind::Format);
}

#[test]
fn test_root_name_is_case_insensitive() {
    assert!(parse_alert("<Alert><identifier>1</identifier></Alert>").is_ok());
}
