use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Ordered key/value storage used for record values.
pub type Record = IndexMap<String, Value>;

/// A node in the runtime data context.
///
/// Records cover both property-style and key-style access, so path
/// resolution only has to be written once against this enum. Serialization
/// is untagged: a `Value` reads and writes as plain JSON or YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<Value>),
    Record(Record),
}

impl Value {
    /// Returns true when the value counts as present for path lookups.
    ///
    /// Null, `false`, numeric zero, the empty string, the string `"0"` and
    /// empty lists or records are all falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => number.as_f64().is_some_and(|float| float != 0.0),
            Value::Text(text) => !text.is_empty() && text != "0",
            Value::List(items) => !items.is_empty(),
            Value::Record(fields) => !fields.is_empty(),
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Numeric view of the value. Text is parsed, so `"7"` yields `7.0`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(number) => number.as_f64(),
            Value::Text(text) => text.trim().parse::<f64>().ok(),
            Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Looks up a record field by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_record()?.get(key)
    }

    /// Short type label used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Builds a number value from a float; non-finite floats become null.
    pub fn from_f64(float: f64) -> Value {
        Number::from_f64(float).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Number(number) => write!(f, "{number}"),
            Value::Text(text) => f.write_str(text),
            other => {
                let json = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => Value::Number(number),
            serde_json::Value::String(text) => Value::Text(text),
            serde_json::Value::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => Value::Record(map.into_iter().map(|(key, value)| (key, Value::from(value))).collect()),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(flag) => serde_json::Value::Bool(flag),
            Value::Number(number) => serde_json::Value::Number(number),
            Value::Text(text) => serde_json::Value::String(text),
            Value::List(items) => serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect()),
            Value::Record(fields) => {
                serde_json::Value::Object(fields.into_iter().map(|(key, value)| (key, serde_json::Value::from(value))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Number(Number::from(number))
    }
}

impl From<usize> for Value {
    fn from(number: usize) -> Self {
        Value::Number(Number::from(number))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Record> for Value {
    fn from(fields: Record) -> Self {
        Value::Record(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values_match_empty_semantics() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!("0"), json!([]), json!({})] {
            assert!(!Value::from(falsy.clone()).is_truthy(), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-2.5), json!("a"), json!("false"), json!([0]), json!({"a": null})] {
            assert!(Value::from(truthy.clone()).is_truthy(), "{truthy} should be truthy");
        }
    }

    #[test]
    fn deserializes_untagged_from_yaml() {
        let value: Value = serde_yaml::from_str("user:\n  name: Ann\n  tags: [a, b]\n  age: 30\n  admin: false\n  note: ~\n").expect("yaml");
        let user = value.get("user").expect("user");
        assert_eq!(user.get("name"), Some(&Value::from("Ann")));
        assert_eq!(user.get("age"), Some(&Value::from(30i64)));
        assert_eq!(user.get("admin"), Some(&Value::Bool(false)));
        assert_eq!(user.get("note"), Some(&Value::Null));
        assert_eq!(user.get("tags").and_then(Value::as_list).map(<[Value]>::len), Some(2));
    }

    #[test]
    fn record_order_survives_json_round_trip() {
        let value = Value::from(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<&str> = value.as_record().expect("record").keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(serde_json::to_string(&value).expect("serialize"), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn display_formats_scalars_plainly() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from("svc").to_string(), "svc");
        assert_eq!(Value::from(42i64).to_string(), "42");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::from(json!({"k": "v"})).to_string(), r#"{"k":"v"}"#);
    }

    #[test]
    fn numeric_view_parses_text() {
        assert_eq!(Value::from("7").as_f64(), Some(7.0));
        assert_eq!(Value::from(" 3.5 ").as_f64(), Some(3.5));
        assert_eq!(Value::from("seven").as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }
}
