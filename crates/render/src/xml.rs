//! Markup fragments. Each helper returns a finished fragment; callers compose
//! them bottom-up instead of sharing a buffer.

use quick_xml::escape::escape;

/// `<tag>text</tag>` with the text escaped.
pub(crate) fn element(tag: &str, text: &str) -> String {
    format!("<{tag}>{}</{tag}>", escape(text))
}

/// `<tag>inner</tag>` around already rendered markup.
pub(crate) fn wrap(tag: &str, inner: &str) -> String {
    format!("<{tag}>{inner}</{tag}>")
}

/// An element, or nothing at all when the value is absent or empty.
pub(crate) fn optional(tag: &str, text: Option<&str>) -> String {
    match text {
        Some(text) if !text.is_empty() => element(tag, text),
        _ => String::new(),
    }
}

/// One element per value, in order.
pub(crate) fn repeated(tag: &str, values: &[String]) -> String {
    values.iter().map(|v| element(tag, v)).collect()
}

pub(crate) fn attribute(text: &str) -> String {
    escape(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_escaped() {
        assert_eq!(element("note", "a < b & c"), "<note>a &lt; b &amp; c</note>");
    }

    #[test]
    fn empty_optional_renders_nothing() {
        assert_eq!(optional("note", None), "");
        assert_eq!(optional("note", Some("")), "");
        assert_eq!(optional("altitude", Some("0")), "<altitude>0</altitude>");
    }

    #[test]
    fn repeated_keeps_order() {
        let values = vec!["Met".to_string(), "Geo".to_string()];
        assert_eq!(
            repeated("category", &values),
            "<category>Met</category><category>Geo</category>"
        );
    }
}
