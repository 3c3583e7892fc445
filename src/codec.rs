//! # Codecs
//!
//! Decode and encode JSON, YAML and TOML streams to and from [`Document`] maps.
//!
//! ## Supported Formats
//!
//! - **JSON**: a single object per stream, encoded compactly with a trailing newline
//! - **YAML** (`yaml` / `yml`): any number of `---`-separated documents, order preserved
//! - **TOML**: a single table per stream
//!
//! Every document root must be a mapping. Empty YAML documents are skipped.

use crate::document::{DatetimeAsText, Document, Map, Number};
use crate::error::HydrateError;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Look up a format by name or file extension (`json`, `yaml`, `yml`, `toml`)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }

    /// Format denoted by the extension of a file name or Kubernetes data key
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        }
    }

    /// Decode every document in the stream
    pub fn decode(self, bytes: &[u8]) -> Result<Vec<Map>, HydrateError> {
        match self {
            Format::Json => {
                let value: serde_json::Value =
                    serde_json::from_slice(bytes).map_err(|e| HydrateError::decode(self, e))?;
                Ok(vec![root_map(self, from_json(value))?])
            }
            Format::Yaml => {
                let mut documents = Vec::new();
                for deserializer in serde_yaml::Deserializer::from_slice(bytes) {
                    let value = serde_yaml::Value::deserialize(deserializer)
                        .map_err(|e| HydrateError::decode(self, e))?;
                    if value.is_null() {
                        debug!("Skipping empty YAML document");
                        continue;
                    }
                    let document = from_yaml(value).map_err(|e| HydrateError::decode(self, e))?;
                    documents.push(root_map(self, document)?);
                }
                Ok(documents)
            }
            Format::Toml => {
                let content =
                    std::str::from_utf8(bytes).map_err(|e| HydrateError::decode(self, e))?;
                let table: toml::Table =
                    toml::from_str(content).map_err(|e| HydrateError::decode(self, e))?;
                Ok(vec![from_toml_table(table)])
            }
        }
    }

    /// Encode documents back into a single stream
    pub fn encode(self, documents: &[Map]) -> Result<Vec<u8>, HydrateError> {
        match self {
            Format::Json => {
                let mut out = Vec::new();
                for document in documents {
                    serde_json::to_writer(&mut out, &DatetimeAsText(document))
                        .map_err(|e| HydrateError::encode(self, e))?;
                    out.push(b'\n');
                }
                Ok(out)
            }
            Format::Yaml => {
                let mut out = String::new();
                for (index, document) in documents.iter().enumerate() {
                    if index > 0 {
                        out.push_str("---\n");
                    }
                    let encoded = serde_yaml::to_string(&DatetimeAsText(document))
                        .map_err(|e| HydrateError::encode(self, e))?;
                    out.push_str(&encoded);
                }
                Ok(out.into_bytes())
            }
            Format::Toml => match documents {
                [] => Ok(Vec::new()),
                [document] => toml::to_string(document)
                    .map(String::into_bytes)
                    .map_err(|e| HydrateError::encode(self, e)),
                _ => Err(HydrateError::encode(
                    self,
                    "a TOML stream holds a single document",
                )),
            },
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl FromStr for Format {
    type Err = HydrateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_name(s).ok_or_else(|| {
            HydrateError::configuration(format!(
                "unknown file format {s:?} (supported: json, yaml, yml, toml)"
            ))
        })
    }
}

fn root_map(format: Format, document: Document) -> Result<Map, HydrateError> {
    match document {
        Document::Map(map) => Ok(map),
        other => Err(HydrateError::decode(
            format,
            format!(
                "expected a mapping at the document root, found {}",
                other.type_name()
            ),
        )),
    }
}

fn from_json(value: serde_json::Value) -> Document {
    match value {
        serde_json::Value::Null => Document::Null,
        serde_json::Value::Bool(b) => Document::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Document::Number(Number::Integer(i)),
            None => Document::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        serde_json::Value::String(s) => Document::String(s),
        serde_json::Value::Array(items) => {
            Document::List(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(object) => Document::Map(
            object
                .into_iter()
                .map(|(key, value)| (key, from_json(value)))
                .collect(),
        ),
    }
}

fn from_yaml(value: serde_yaml::Value) -> Result<Document, String> {
    Ok(match value {
        serde_yaml::Value::Null => Document::Null,
        serde_yaml::Value::Bool(b) => Document::Bool(b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Document::Number(Number::Integer(i)),
            None => Document::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        serde_yaml::Value::String(s) => Document::String(s),
        serde_yaml::Value::Sequence(items) => Document::List(
            items
                .into_iter()
                .map(from_yaml)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(yaml_key(key)?, from_yaml(value)?);
            }
            Document::Map(map)
        }
        // Tags carry no meaning for hydration; keep the tagged value
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value)?,
    })
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("unsupported mapping key: {other:?}")),
    }
}

fn from_toml(value: toml::Value) -> Document {
    match value {
        toml::Value::String(s) => Document::String(s),
        toml::Value::Integer(i) => Document::Number(Number::Integer(i)),
        toml::Value::Float(f) => Document::Number(Number::Float(f)),
        toml::Value::Boolean(b) => Document::Bool(b),
        toml::Value::Datetime(d) => Document::Datetime(d),
        toml::Value::Array(items) => Document::List(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => Document::Map(from_toml_table(table)),
    }
}

fn from_toml_table(table: toml::Table) -> Map {
    table
        .into_iter()
        .map(|(key, value)| (key, from_toml(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod format_lookup_tests {
        use super::*;

        #[test]
        fn test_from_name_aliases() {
            assert_eq!(Format::from_name("json"), Some(Format::Json));
            assert_eq!(Format::from_name("yml"), Some(Format::Yaml));
            assert_eq!(Format::from_name("YAML"), Some(Format::Yaml));
            assert_eq!(Format::from_name(".toml"), Some(Format::Toml));
            assert_eq!(Format::from_name("ini"), None);
        }

        #[test]
        fn test_from_path_uses_extension() {
            assert_eq!(Format::from_path("db.json"), Some(Format::Json));
            assert_eq!(Format::from_path("config/app.yml"), Some(Format::Yaml));
            assert_eq!(Format::from_path("settings.toml"), Some(Format::Toml));
            assert_eq!(Format::from_path("password"), None);
            assert_eq!(Format::from_path("cert.pem"), None);
        }

        #[test]
        fn test_from_str_unknown_format_is_configuration_error() {
            let err = "xml".parse::<Format>().unwrap_err();
            assert!(matches!(err, HydrateError::Configuration(_)));
            assert!(err.to_string().contains("unknown file format"));
        }
    }

    mod decode_tests {
        use super::*;

        #[test]
        fn test_decode_json_object() {
            let docs = Format::Json
                .decode(br#"{"a": 1, "b": {"c": "x"}, "d": [1, 2.5]}"#)
                .unwrap();
            assert_eq!(docs.len(), 1);
            let doc = &docs[0];
            assert_eq!(doc["a"], Document::Number(Number::Integer(1)));
            assert_eq!(doc["b"].as_map().unwrap()["c"], Document::from("x"));
            assert_eq!(
                doc["d"],
                Document::List(vec![
                    Document::Number(Number::Integer(1)),
                    Document::Number(Number::Float(2.5)),
                ])
            );
        }

        #[test]
        fn test_decode_json_rejects_non_object_root() {
            let err = Format::Json.decode(b"[1, 2]").unwrap_err();
            assert!(matches!(
                err,
                HydrateError::Format {
                    operation: "decode",
                    ..
                }
            ));
        }

        #[test]
        fn test_decode_yaml_multiple_documents_in_order() {
            let docs = Format::Yaml
                .decode(b"name: first\n---\nname: second\n---\n")
                .unwrap();
            assert_eq!(docs.len(), 2);
            assert_eq!(docs[0]["name"], Document::from("first"));
            assert_eq!(docs[1]["name"], Document::from("second"));
        }

        #[test]
        fn test_decode_yaml_stringifies_scalar_keys() {
            let docs = Format::Yaml.decode(b"1: one\ntrue: yes\n").unwrap();
            assert_eq!(docs[0]["1"], Document::from("one"));
            assert!(docs[0].contains_key("true"));
        }

        #[test]
        fn test_decode_yaml_invalid() {
            let err = Format::Yaml.decode(b"a: [unclosed\n").unwrap_err();
            assert!(err.to_string().starts_with("failed to decode YAML"));
        }

        #[test]
        fn test_decode_toml_with_datetime() {
            let docs = Format::Toml
                .decode(b"title = \"x\"\nwhen = 1979-05-27T07:32:00Z\n[db]\nport = 5432\n")
                .unwrap();
            let doc = &docs[0];
            assert_eq!(doc["title"], Document::from("x"));
            assert_eq!(
                doc["when"],
                Document::Datetime("1979-05-27T07:32:00Z".parse().unwrap())
            );
            assert_eq!(
                doc["db"].as_map().unwrap()["port"],
                Document::Number(Number::Integer(5432))
            );
        }
    }

    mod round_trip_tests {
        use super::*;

        fn sample() -> Map {
            let mut db = Map::new();
            db.insert("host".to_string(), "localhost".into());
            db.insert("port".to_string(), Document::Number(Number::Integer(5432)));
            db.insert("ratio".to_string(), Document::Number(Number::Float(0.75)));
            db.insert("tls".to_string(), Document::Bool(false));

            let mut root = Map::new();
            root.insert("db".to_string(), Document::Map(db));
            root.insert(
                "hosts".to_string(),
                Document::List(vec!["a".into(), "$SECRET".into()]),
            );
            root.insert("password".to_string(), "123".into());
            root
        }

        #[test]
        fn test_round_trip_every_format() {
            for format in [Format::Json, Format::Yaml, Format::Toml] {
                let original = vec![sample()];
                let encoded = format.encode(&original).unwrap();
                let decoded = format.decode(&encoded).unwrap();
                assert_eq!(decoded, original, "round trip through {format}");
            }
        }

        #[test]
        fn test_yaml_stream_round_trip_preserves_order() {
            let mut second = Map::new();
            second.insert("kind".to_string(), "ConfigMap".into());
            let original = vec![sample(), second];

            let encoded = Format::Yaml.encode(&original).unwrap();
            assert!(String::from_utf8(encoded.clone()).unwrap().contains("\n---\n"));
            assert_eq!(Format::Yaml.decode(&encoded).unwrap(), original);
        }

        #[test]
        fn test_toml_cannot_encode_null() {
            let mut doc = Map::new();
            doc.insert("missing".to_string(), Document::Null);
            let err = Format::Toml.encode(&[doc]).unwrap_err();
            assert!(matches!(
                err,
                HydrateError::Format {
                    format: Format::Toml,
                    operation: "encode",
                    ..
                }
            ));
        }

        #[test]
        fn test_toml_datetime_stays_a_datetime() {
            let input = b"when = 1979-05-27T07:32:00Z\nday = 1979-05-27\n";
            let encoded = Format::Toml.encode(&Format::Toml.decode(input).unwrap()).unwrap();

            let table: toml::Table = toml::from_str(std::str::from_utf8(&encoded).unwrap()).unwrap();
            assert!(table["when"].is_datetime(), "got {:?}", table["when"]);
            assert!(table["day"].is_datetime(), "got {:?}", table["day"]);
            assert_eq!(
                table["when"].as_datetime().unwrap().to_string(),
                "1979-05-27T07:32:00Z"
            );
        }

        #[test]
        fn test_toml_datetime_encodes_as_text_elsewhere() {
            let docs = Format::Toml.decode(b"when = 1979-05-27T07:32:00Z\n").unwrap();
            assert_eq!(
                Format::Json.encode(&docs).unwrap(),
                b"{\"when\":\"1979-05-27T07:32:00Z\"}\n"
            );
            let yaml = String::from_utf8(Format::Yaml.encode(&docs).unwrap()).unwrap();
            assert_eq!(
                Format::Yaml.decode(yaml.as_bytes()).unwrap()[0]["when"],
                Document::from("1979-05-27T07:32:00Z")
            );
        }

        #[test]
        fn test_json_encode_is_compact_with_newline() {
            let mut doc = Map::new();
            doc.insert("pwd".to_string(), "x".into());
            let encoded = Format::Json.encode(&[doc]).unwrap();
            assert_eq!(encoded, b"{\"pwd\":\"x\"}\n");
        }
    }
}
