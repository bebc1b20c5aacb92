use std::collections::HashMap;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as Json;

use crate::renderer::RenderError;

/// The data a template is rendered against.
///
/// A `Value` is one of three shapes: a text scalar, an ordered list, or a
/// record of named fields. Templates address values by dotted key paths that
/// walk nested records (see [`Value::lookup`]).
///
/// # Example
///
/// ```
/// use zero_template::{Value, context};
///
/// let ctx = context! {
///     "user" => context! { "name" => "Ada" },
///     "tags" => vec!["math", "engines"],
/// };
///
/// assert_eq!(ctx.lookup("user.name").and_then(Value::as_text), Some("Ada"));
/// assert_eq!(ctx.lookup("tags").and_then(Value::as_list).map(<[Value]>::len), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A leaf scalar.
    Text(String),

    /// An ordered list of values.
    List(Vec<Value>),

    /// Named fields. Keys are unique, order is irrelevant.
    Record(HashMap<String, Value>),
}

impl Value {
    /// Converts a JSON value, dropping whatever is not text, array or object.
    ///
    /// Array elements and object fields that fail to convert are skipped, so
    /// containers always convert. Returns `None` only when `json` itself is a
    /// number, boolean or `null`.
    pub fn from_json(json: &Json) -> Option<Value> {
        match json {
            Json::String(s) => Some(Value::Text(s.clone())),
            Json::Array(items) => Some(Value::List(
                items.iter().filter_map(Value::from_json).collect(),
            )),
            Json::Object(fields) => Some(Value::Record(
                fields
                    .iter()
                    .filter_map(|(key, field)| Some((key.clone(), Value::from_json(field)?)))
                    .collect(),
            )),
            Json::Null | Json::Bool(_) | Json::Number(_) => None,
        }
    }

    /// Resolves a dotted key path against this value.
    ///
    /// Every segment must land on a record field. Empty segments are ignored,
    /// so `""` and `"."` resolve to `self`. Walking through text or a list
    /// yields `None`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |current, segment| current.as_record()?.get(segment))
    }

    /// Get this value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get this value as a record, if it is one.
    pub fn as_record(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }
}

/// Name of a JSON value's shape, as reported by `InvalidContext`.
pub(crate) fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

impl TryFrom<&Json> for Value {
    type Error = RenderError;

    fn try_from(json: &Json) -> Result<Self, Self::Error> {
        Value::from_json(json).ok_or(RenderError::InvalidContext {
            found: json_kind(json),
        })
    }
}

impl TryFrom<Json> for Value {
    type Error = RenderError;

    fn try_from(json: Json) -> Result<Self, Self::Error> {
        Value::try_from(&json)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        Value::try_from(&json).map_err(DeError::custom)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(fields: HashMap<String, Value>) -> Self {
        Value::Record(fields)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Record(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
