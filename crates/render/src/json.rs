use crate::RenderError;
use cap_alert_core::Alert;
use serde::Serialize;

#[derive(Serialize)]
struct Envelope<'a> {
    alert: &'a Alert,
}

/// Render the alert as `{"alert": {...}}`. Empty optional values and empty
/// lists are left out.
pub fn to_json(alert: &Alert) -> Result<String, RenderError> {
    Ok(serde_json::to_string(&Envelope { alert })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cap_alert_core::Info;

    #[test]
    fn category_order_is_preserved() {
        let alert = Alert {
            identifier: "id".to_string(),
            info: vec![Info {
                category: vec!["Met".to_string(), "Geo".to_string()],
                ..Info::default()
            }],
            ..Alert::default()
        };
        let json: serde_json::Value = serde_json::from_str(&to_json(&alert).unwrap()).unwrap();
        assert_eq!(json["alert"]["info"][0]["category"], serde_json::json!(["Met", "Geo"]));
        assert_eq!(json["alert"]["msgType"], "");
        assert!(json["alert"].get("references").is_none());
    }
}
