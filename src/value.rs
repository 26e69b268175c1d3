use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Number;

/// A node in the authored configuration tree.
///
/// The reader produces this shape and the serializer consumes it. Symbols
/// carry the display name only: keywords lose their leading colon when they
/// are read, so `:prod` and `prod` are indistinguishable past the reader.
/// Maps preserve authored entry order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(Number),
    String(String),
    Symbol(String),
    Seq(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Display name of a symbol or string value.
    pub fn name(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) | Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_map(self) -> Option<IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Converts the tree into the wire-format JSON representation.
    ///
    /// Symbols become plain strings; map entry order carries over.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => serde_json::Value::Number(n),
            Value::String(s) | Value::Symbol(s) => serde_json::Value::String(s),
            Value::Seq(items) => {
                serde_json::Value::Array(items.into_iter().map(Value::into_json).collect())
            }
            Value::Map(entries) => {
                let mut out = serde_json::Map::new();
                for (key, value) in entries {
                    out.insert(key, value.into_json());
                }
                serde_json::Value::Object(out)
            }
        }
    }
}

/// Serializes the same way [`Value::into_json`] converts: symbols as plain
/// strings, `Nil` as null, maps in entry order.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) | Value::Symbol(s) => serializer.serialize_str(s),
            Value::Seq(items) => items.serialize(serializer),
            Value::Map(entries) => entries.serialize(serializer),
        }
    }
}
