//! One URL entry, kept exactly as the API sent it.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// A record of the `data` object.
///
/// Only `url` is required (and must be a string); every other field,
/// and the order of all fields, is preserved for JSON and HTML output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct UrlRecord {
    url: String,
    fields: Map<String, Value>,
}

impl UrlRecord {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn occurrence(&self) -> Occurrence {
        Occurrence::from(self.fields.get("occurrence"))
    }

    /// The `type` field as printed in text output.
    pub fn kind(&self) -> String {
        display_value(self.fields.get("type"))
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Map<String, Value>> for UrlRecord {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let url = match fields.get("url") {
            Some(Value::String(url)) => url.clone(),
            Some(other) => return Err(format!("record url is not a string: {}", other)),
            None => return Err("record has no url".to_string()),
        };
        Ok(Self { url, fields })
    }
}

impl Serialize for UrlRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Occurrence count. Usually a number, sometimes a string; anything else
/// (null, float, missing) is carried as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum Occurrence {
    Count(i64),
    Text(String),
    Other(Value),
}

impl From<Option<&Value>> for Occurrence {
    fn from(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) if n.is_i64() => {
                Occurrence::Count(n.as_i64().unwrap_or_default())
            }
            Some(Value::String(s)) => Occurrence::Text(s.clone()),
            Some(other) => Occurrence::Other(other.clone()),
            None => Occurrence::Other(Value::Null),
        }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occurrence::Count(n) => write!(f, "{}", n),
            Occurrence::Text(s) => f.write_str(s),
            Occurrence::Other(v) => f.write_str(&display_value(Some(v))),
        }
    }
}

/// Strings verbatim, null or missing as `None`, anything else as JSON text.
fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => "None".to_string(),
        Some(other) => other.to_string(),
    }
}
