use cap_alert_core::{parse_alert, Alert, Area, Info, ValuePair};
use render::{to_cap, to_georss_item, to_json, to_kml, Feed, MapResolver, NoopResolver, Representation};
use std::fs;

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../core/tests/fixtures/typhoon.xml"
);

fn fixture() -> Alert {
    parse_alert(&fs::read_to_string(FIXTURE).unwrap()).unwrap()
}

fn resolver() -> MapResolver {
    MapResolver::new()
        .with("63", Representation::Kml, "<Polygon><outerBoundaryIs/></Polygon>")
        .with("63", Representation::Gml, "<gml:Polygon><gml:exterior/></gml:Polygon>")
}

#[test]
fn cap_output_reingests_to_the_same_model() {
    let alert = fixture();
    let xml = to_cap(&alert);
    let again = parse_alert(&xml).unwrap();
    assert_eq!(again, alert);
    assert_eq!(to_cap(&again), xml);
}

#[test]
fn built_model_survives_cap_round_trip() {
    let mut info = Info {
        language: "en-US".to_string(),
        category: vec!["Met".to_string(), "Geo".to_string()],
        event: "Flood <river>".to_string(),
        urgency: "Immediate".to_string(),
        severity: "Extreme".to_string(),
        certainty: "Observed".to_string(),
        expires: Some("2099-01-01T00:00:00-05:00".to_string()),
        parameter: vec![ValuePair::new("a&b", "\"quoted\"")],
        ..Info::default()
    };
    let mut area = Area::new("Riverside");
    area.polygon = vec!["1,1 1,2 2,2 1,1".to_string()];
    area.altitude = Some("-20".to_string());
    area.ceiling = Some("400".to_string());
    info.area.push(area);

    let alert = Alert {
        identifier: "flood-1".to_string(),
        sender: "ops@example.org".to_string(),
        sent: "2024-05-01T08:00:00-05:00".to_string(),
        status: "Exercise".to_string(),
        msg_type: "Alert".to_string(),
        scope: "Public".to_string(),
        info: vec![info],
        ..Alert::default()
    };

    let again = parse_alert(&to_cap(&alert)).unwrap();
    // xmlns is recorded on ingestion even when the model had none
    assert_eq!(again.xmlns.as_deref(), Some(render::cap::CAP_NAMESPACE));
    assert_eq!(Alert { xmlns: None, ..again }, alert);
}

#[test]
fn every_format_preserves_list_order() {
    let alert = fixture();

    let cap = to_cap(&alert);
    assert!(cap.find("<category>Met</category>").unwrap() < cap.find("<category>Geo</category>").unwrap());
    assert!(cap.find("<code>IPAWSv1.0</code>").unwrap() < cap.find("<code>TWv1.0</code>").unwrap());

    let json = to_json(&alert).unwrap();
    assert!(json.find("\"Shelter\"").unwrap() < json.find("\"Monitor\"").unwrap());

    let kml = to_kml(&alert, &NoopResolver);
    assert!(kml.find("臺北市").unwrap() < kml.find("基隆外海").unwrap());
}

#[test]
fn geographic_outputs_are_well_formed() {
    let alert = fixture();

    let kml = to_kml(&alert, &resolver());
    let doc = roxmltree::Document::parse(&kml).unwrap();
    assert_eq!(doc.root_element().tag_name().name(), "kml");
    let placemarks: Vec<_> = doc
        .descendants()
        .filter(|n| n.has_tag_name("Placemark"))
        .collect();
    assert_eq!(placemarks.len(), 2);
    let polygons = placemarks[0]
        .descendants()
        .filter(|n| n.has_tag_name("Polygon"))
        .count();
    // the area polygon plus the resolved geocode boundary
    assert_eq!(polygons, 2);

    let mut feed = Feed::new("urn:feed", "Alerts", "2024-07-24T14:30:00+08:00", "cwb", "");
    feed.push(alert);
    let atom = feed.to_georss(&resolver());
    let doc = roxmltree::Document::parse(&atom).unwrap();
    assert_eq!(doc.root_element().tag_name().name(), "feed");
    assert!(atom.contains("<georss:where><gml:Polygon>"));
    assert!(atom.contains("<georss:radius>30000</georss:radius>"));
    assert!(atom.contains("<georss:polygon>25.21 121.45 25.21 121.67"));
}

#[test]
fn unresolved_geocodes_are_left_out() {
    let alert = fixture();
    let item = to_georss_item(&alert, &NoopResolver);
    assert!(!item.contains("georss:where"));
    assert!(item.contains("<title>颱風</title>"));
    assert!(item.contains("&amp; strengthening"));
}

#[test]
fn feed_loads_alert_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("typhoon.xml");
    fs::copy(FIXTURE, &path).unwrap();

    let mut feed = Feed::new("urn:feed", "Alerts", "2024-07-24T14:30:00+08:00", "cwb", "https://example.org/");
    feed.load_file(&path).unwrap();
    assert_eq!(feed.alerts.len(), 1);
    assert!(feed.to_georss(&NoopResolver).contains("<link href=\"https://example.org/\"/>"));

    let err = feed.load_file(&dir.path().join("missing.xml")).unwrap_err();
    assert!(matches!(err, render::RenderError::Io { .. }));

    fs::write(dir.path().join("bad.xml"), "<feed/>").unwrap();
    let err = feed.load_file(&dir.path().join("bad.xml")).unwrap_err();
    assert!(matches!(err, render::RenderError::Ingest(_)));
    assert_eq!(feed.alerts.len(), 1);
}
