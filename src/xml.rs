//! Shared helpers for the server's XML wire format.
//!
//! Responses are namespaced XML documents whose data lives in element
//! attributes. This module provides the attribute scanner the model parsers
//! are built on, plus the two value-parsing rules the wire format uses for
//! booleans and timestamps.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::error::ApiError;

/// Attributes of one XML element, keyed by local attribute name.
pub(crate) type AttributeMap = HashMap<String, String>;

/// Parses a server-sent boolean attribute.
///
/// The wire format's rule is deliberately narrow: the literal string `"true"`
/// (any letter case) is `true`; anything else, including an absent attribute,
/// is `false`. This is an explicit parsing rule, not a general coercion.
///
/// ```rust
/// use chartwell_api::xml::parse_server_boolean;
///
/// assert!(parse_server_boolean(Some("true")));
/// assert!(parse_server_boolean(Some("TRUE")));
/// assert!(!parse_server_boolean(Some("false")));
/// assert!(!parse_server_boolean(Some("1")));
/// assert!(!parse_server_boolean(None));
/// ```
#[must_use]
pub fn parse_server_boolean(raw: Option<&str>) -> bool {
    raw.is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

/// Parses a server-sent timestamp attribute.
///
/// Timestamps are RFC 3339 in UTC (e.g. `2016-08-11T21:22:40Z`). An absent
/// attribute yields `None` rather than an error; a present but malformed
/// value is an error.
pub fn parse_server_datetime(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, ApiError> {
    raw.map(|value| {
        DateTime::parse_from_rfc3339(value)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(ApiError::from)
    })
    .transpose()
}

/// Formats a timestamp the way the server sends them.
#[must_use]
pub fn format_server_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Scans a response document for every element with the given local name in
/// the given namespace, at any depth, and collects each element's attributes.
///
/// Zero matches yields an empty vec, not an error.
pub(crate) fn collect_elements(
    resp: &[u8],
    namespace: &str,
    local_name: &str,
) -> Result<Vec<AttributeMap>, ApiError> {
    let mut reader = NsReader::from_reader(resp);
    let mut found = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) | Event::Empty(element) => {
                let (resolved, local) = reader.resolve_element(element.name());
                let in_namespace = matches!(
                    resolved,
                    ResolveResult::Bound(Namespace(bound)) if bound == namespace.as_bytes()
                );
                if in_namespace && local.as_ref() == local_name.as_bytes() {
                    let mut attributes = AttributeMap::new();
                    for attribute in element.attributes() {
                        let attribute = attribute?;
                        let key =
                            String::from_utf8_lossy(attribute.key.local_name().as_ref())
                                .into_owned();
                        let value = attribute.unescape_value()?.into_owned();
                        attributes.insert(key, value);
                    }
                    found.push(attributes);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const NS: &str = "http://chartwell.dev/api";

    #[test]
    fn test_boolean_only_matches_literal_true() {
        assert!(parse_server_boolean(Some("true")));
        assert!(parse_server_boolean(Some("True")));
        assert!(parse_server_boolean(Some("TRUE")));
        assert!(!parse_server_boolean(Some("false")));
        assert!(!parse_server_boolean(Some("yes")));
        assert!(!parse_server_boolean(Some("1")));
        assert!(!parse_server_boolean(Some("")));
        assert!(!parse_server_boolean(None));
    }

    #[test]
    fn test_datetime_absent_is_none() {
        assert_eq!(parse_server_datetime(None).unwrap(), None);
    }

    #[test]
    fn test_datetime_parses_server_format() {
        let parsed = parse_server_datetime(Some("2016-08-11T21:22:40Z"))
            .unwrap()
            .unwrap();
        let expected = Utc.with_ymd_and_hms(2016, 8, 11, 21, 22, 40).unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(format_server_datetime(parsed), "2016-08-11T21:22:40Z");
    }

    #[test]
    fn test_datetime_malformed_is_an_error() {
        assert!(parse_server_datetime(Some("last tuesday")).is_err());
    }

    #[test]
    fn test_collect_elements_matches_at_any_depth() {
        let xml = format!(
            r#"<apiResponse xmlns="{NS}">
                 <virtualConnections>
                   <virtualConnection id="a" name="first"/>
                   <virtualConnection id="b" name="second"/>
                 </virtualConnections>
               </apiResponse>"#
        );
        let elements = collect_elements(xml.as_bytes(), NS, "virtualConnection").unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].get("id").unwrap(), "a");
        assert_eq!(elements[1].get("name").unwrap(), "second");
    }

    #[test]
    fn test_collect_elements_honors_namespace() {
        let xml = r#"<apiResponse xmlns="http://other.example.com/api">
                       <virtualConnection id="a"/>
                     </apiResponse>"#;
        let elements = collect_elements(xml.as_bytes(), NS, "virtualConnection").unwrap();
        assert!(elements.is_empty());
    }

    #[test]
    fn test_collect_elements_supports_prefixes() {
        let xml = format!(
            r#"<c:apiResponse xmlns:c="{NS}">
                 <c:connection id="x" serverAddress="db.example.com"/>
               </c:apiResponse>"#
        );
        let elements = collect_elements(xml.as_bytes(), NS, "connection").unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].get("serverAddress").unwrap(), "db.example.com");
    }

    #[test]
    fn test_collect_elements_unescapes_attribute_values() {
        let xml = format!(
            r#"<apiResponse xmlns="{NS}">
                 <connection id="x" userName="duo &amp; heero"/>
               </apiResponse>"#
        );
        let elements = collect_elements(xml.as_bytes(), NS, "connection").unwrap();
        assert_eq!(elements[0].get("userName").unwrap(), "duo & heero");
    }

    #[test]
    fn test_collect_elements_empty_document_is_empty_vec() {
        let xml = format!(r#"<apiResponse xmlns="{NS}"/>"#);
        let elements = collect_elements(xml.as_bytes(), NS, "virtualConnection").unwrap();
        assert!(elements.is_empty());
    }

    #[test]
    fn test_collect_elements_rejects_malformed_xml() {
        let xml = b"<apiResponse><unclosed";
        assert!(collect_elements(xml, NS, "virtualConnection").is_err());
    }
}
