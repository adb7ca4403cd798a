//! Dynamically-typed configuration values.
//!
//! Every supported config format deserializes into the same [`Value`] tree,
//! so lookups and template engines never care which file format was used.
//!
//! Mapping keys are always strings. Scalar keys (`0: '#000000'`, `true: x`)
//! are stringified the same way [`Value::as_scalar_string`] does for values.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Key `toml` uses to smuggle a datetime through `deserialize_any`.
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

/// Variable bindings handed to a template, keyed by variable name.
pub type Variables = BTreeMap<String, Value>;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Variables),
}

impl Value {
    /// Borrow the nested mapping, if this value is one.
    pub fn as_map(&self) -> Option<&Variables> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Scalar coercion to a string. Lists, maps and null yield `None`.
    pub fn as_scalar_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(_) | Value::Float(_) | Value::Bool(_) => Some(self.to_string()),
            Value::Null | Value::List(_) | Value::Map(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => b.fmt(f),
            Value::Integer(i) => i.fmt(f),
            Value::Float(x) => x.fmt(f),
            Value::String(s) => s.fmt(f),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a configuration value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Integer))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = Variables::new();
        while let Some(MapKey(key)) = access.next_key()? {
            let value: Value = access.next_value()?;
            map.insert(key, value);
        }
        if map.len() == 1 {
            if let Some(Value::String(datetime)) = map.get(TOML_DATETIME_KEY) {
                return Ok(Value::String(datetime.clone()));
            }
        }
        Ok(Value::Map(map))
    }
}

/// A mapping key: any scalar, stringified.
struct MapKey(String);

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MapKeyVisitor)
    }
}

struct MapKeyVisitor;

impl<'de> Visitor<'de> for MapKeyVisitor {
    type Value = MapKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean mapping key")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MapKey, E> {
        Ok(MapKey(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<MapKey, E> {
        Ok(MapKey(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<MapKey, E> {
        Ok(MapKey("null".to_owned()))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_scalars_map_to_typed_variants() {
        let v: Value = serde_yaml::from_str("a: 1\nb: 2.5\nc: true\nd: hi\ne: ~\nf: [1, x]\n")
            .expect("parse");
        let map = v.as_map().expect("map");
        assert_eq!(map["a"], Value::Integer(1));
        assert_eq!(map["b"], Value::Float(2.5));
        assert_eq!(map["c"], Value::Bool(true));
        assert_eq!(map["d"], Value::from("hi"));
        assert_eq!(map["e"], Value::Null);
        assert_eq!(
            map["f"],
            Value::List(vec![Value::Integer(1), Value::from("x")])
        );
    }

    #[test]
    fn scalar_mapping_keys_become_strings() {
        let v: Value =
            serde_yaml::from_str("colors:\n  0: '#000000'\n  1: '#ffffff'\nflags:\n  true: on\n  2.5: half\n")
                .expect("parse");
        let map = v.as_map().expect("map");
        let colors = map["colors"].as_map().expect("colors");
        assert_eq!(colors["0"], Value::from("#000000"));
        assert_eq!(colors["1"], Value::from("#ffffff"));
        let flags = map["flags"].as_map().expect("flags");
        assert_eq!(flags["true"], Value::from("on"));
        assert_eq!(flags["2.5"], Value::from("half"));
    }

    #[test]
    fn sequence_keys_are_rejected() {
        let err = serde_yaml::from_str::<Value>("? [a, b]\n: x\n").unwrap_err();
        assert!(err.to_string().contains("mapping key"), "got: {err}");
    }

    #[test]
    fn scalar_coercion() {
        assert_eq!(Value::Integer(42).as_scalar_string().as_deref(), Some("42"));
        assert_eq!(Value::Bool(false).as_scalar_string().as_deref(), Some("false"));
        assert_eq!(Value::from("x").as_scalar_string().as_deref(), Some("x"));
        assert!(Value::Null.as_scalar_string().is_none());
        assert!(Value::List(vec![]).as_scalar_string().is_none());
        assert!(Value::Map(Variables::new()).as_scalar_string().is_none());
    }

    #[test]
    fn serializes_without_variant_tags() {
        let mut map = Variables::new();
        map.insert("editor".into(), Value::from("vim"));
        map.insert("tabs".into(), Value::Integer(4));
        let json = serde_json::to_string(&Value::Map(map)).expect("json");
        assert_eq!(json, r#"{"editor":"vim","tabs":4}"#);
    }
}
