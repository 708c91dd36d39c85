//! Cache Value Module
//!
//! Defines the values the cache accepts and their wire encoding.

use serde::Serialize;

// == Value ==
/// A value accepted by [`Cache::store`](crate::cache::Cache::store).
///
/// The cache never validates or transforms values beyond encoding them the
/// way Redis clients do: text as UTF-8, numbers as decimal text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// UTF-8 text, stored as its bytes
    Text(String),
    /// Binary blob, stored as-is
    Bytes(Vec<u8>),
    /// Integer, stored as decimal text
    Int(i64),
    /// Floating-point number, stored as decimal text
    Float(f64),
}

impl Value {
    // == Encode ==
    /// Returns the bytes written to the backing store.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Text(text) => text.as_bytes().to_vec(),
            Value::Bytes(bytes) => bytes.clone(),
            Value::Int(n) => n.to_string().into_bytes(),
            Value::Float(x) => x.to_string().into_bytes(),
        }
    }

    /// Returns the name of the variant, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}
