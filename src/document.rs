//! # Document
//!
//! Format-independent document tree.
//!
//! Every codec decodes into [`Document`] and encodes from it, so the
//! hydration engine never sees JSON, YAML or TOML specifics. Map keys are kept
//! sorted; hydration is a per-key transform and never depends on order.
//!
//! TOML datetimes are kept as their own leaf so a TOML stream encodes back to
//! TOML unchanged. Formats without a datetime type write them as RFC 3339
//! text through [`DatetimeAsText`].

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use toml::value::Datetime;

/// A mapping node
pub type Map = BTreeMap<String, Document>;

#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Datetime(Datetime),
    /// Lists are carried through untouched; hydration never descends into them
    List(Vec<Document>),
    Map(Map),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Document {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Document::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Document::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short type name used in diagnostics
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Document::Null => "null",
            Document::Bool(_) => "bool",
            Document::Number(Number::Integer(_)) => "integer",
            Document::Number(Number::Float(_)) => "float",
            Document::String(_) => "string",
            Document::Datetime(_) => "datetime",
            Document::List(_) => "list",
            Document::Map(_) => "map",
        }
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Document::String(value.to_string())
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Document::String(value)
    }
}

impl From<Map> for Document {
    fn from(value: Map) -> Self {
        Document::Map(value)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::Null => serializer.serialize_unit(),
            Document::Bool(b) => serializer.serialize_bool(*b),
            Document::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Document::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Document::String(s) => serializer.serialize_str(s),
            Document::Datetime(d) => d.serialize(serializer),
            Document::List(items) => serializer.collect_seq(items),
            Document::Map(map) => serializer.collect_map(map),
        }
    }
}

/// Serializes a document with datetimes written as RFC 3339 strings
///
/// Used for JSON and YAML, which would otherwise see the TOML datetime's
/// internal struct form.
#[derive(Debug, Clone, Copy)]
pub struct DatetimeAsText<'a, T>(pub &'a T);

impl Serialize for DatetimeAsText<'_, Document> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Document::Datetime(d) => serializer.collect_str(d),
            Document::List(items) => serializer.collect_seq(items.iter().map(DatetimeAsText)),
            Document::Map(map) => DatetimeAsText(map).serialize(serializer),
            other => other.serialize(serializer),
        }
    }
}

impl Serialize for DatetimeAsText<'_, Map> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(key, value)| (key, DatetimeAsText(value))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_nested_map_to_json() {
        let mut inner = Map::new();
        inner.insert("port".to_string(), Document::Number(Number::Integer(5432)));
        inner.insert("tls".to_string(), Document::Bool(true));

        let mut root = Map::new();
        root.insert("db".to_string(), Document::Map(inner));
        root.insert(
            "hosts".to_string(),
            Document::List(vec!["a".into(), "b".into()]),
        );
        root.insert("note".to_string(), Document::Null);

        let json = serde_json::to_string(&Document::Map(root)).unwrap();
        assert_eq!(
            json,
            r#"{"db":{"port":5432,"tls":true},"hosts":["a","b"],"note":null}"#
        );
    }

    #[test]
    fn test_accessors() {
        let mut doc = Document::Map(Map::new());
        assert!(doc.as_map().is_some());
        assert!(doc.as_map_mut().is_some());
        assert_eq!(doc.as_str(), None);
        assert_eq!(Document::from("x").as_str(), Some("x"));
        assert_eq!(Document::Number(Number::Float(1.5)).type_name(), "float");
    }

    #[test]
    fn test_datetime_as_text_for_json() {
        let when: Datetime = "1979-05-27T07:32:00Z".parse().unwrap();
        let mut nested = Map::new();
        nested.insert("at".to_string(), Document::Datetime(when));

        let mut root = Map::new();
        root.insert("when".to_string(), Document::Datetime(when));
        root.insert("history".to_string(), Document::List(vec![Document::Datetime(when)]));
        root.insert("event".to_string(), Document::Map(nested));

        let json = serde_json::to_string(&DatetimeAsText(&root)).unwrap();
        assert_eq!(
            json,
            r#"{"event":{"at":"1979-05-27T07:32:00Z"},"history":["1979-05-27T07:32:00Z"],"when":"1979-05-27T07:32:00Z"}"#
        );
    }
}
