//! Clause values extracted by the backend SLA analyzer.
//!
//! The backend emits free-form JSON per clause. The tagged variants here
//! make the reconciler's recursion exhaustive instead of relying on
//! runtime type inspection of raw JSON values.

use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single extracted clause value.
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseValue {
    /// `null` in the backend payload, or a clause the contract lacks.
    Absent,
    Text(String),
    Number(serde_json::Number),
    /// Ordered sequence of values. Compared as a whole, never per element.
    List(Vec<ClauseValue>),
    /// Nested clause object, e.g. `fees: {late: 50, early: 0}`.
    Map(ClauseMap),
}

impl ClauseValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, ClauseValue::Absent)
    }

    /// Absent, null and empty-string all count as "missing" for risk
    /// classification, but stay distinct values for difference detection.
    pub fn is_missing(&self) -> bool {
        match self {
            ClauseValue::Absent => true,
            ClauseValue::Text(t) => t.is_empty(),
            _ => false,
        }
    }

    pub fn as_map(&self) -> Option<&ClauseMap> {
        match self {
            ClauseValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Canonical JSON serialization, used to detect differing values
    /// across contracts. Serializing plain data into JSON cannot fail.
    pub fn canonical(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<&str> for ClauseValue {
    fn from(s: &str) -> Self {
        ClauseValue::Text(s.to_owned())
    }
}

impl From<i64> for ClauseValue {
    fn from(n: i64) -> Self {
        ClauseValue::Number(n.into())
    }
}

/// Insertion-ordered clause map. First-seen key order is what the
/// dashboard renders, so wire order must survive deserialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseMap(Vec<(String, ClauseValue)>);

impl ClauseMap {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: ClauseValue) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ClauseValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClauseValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ClauseValue)> for ClauseMap {
    fn from_iter<I: IntoIterator<Item = (String, ClauseValue)>>(iter: I) -> Self {
        let mut map = ClauseMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for ClauseValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ClauseValue::Absent => serializer.serialize_unit(),
            ClauseValue::Text(t) => serializer.serialize_str(t),
            ClauseValue::Number(n) => n.serialize(serializer),
            ClauseValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ClauseValue::Map(m) => m.serialize(serializer),
        }
    }
}

impl Serialize for ClauseMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct ClauseValueVisitor;

impl<'de> Visitor<'de> for ClauseValueVisitor {
    type Value = ClauseValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON clause value")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(ClauseValue::Absent)
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(ClauseValue::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        ClauseValue::deserialize(deserializer)
    }

    // Backend SLA extraction never emits booleans, but the type stays
    // total over arbitrary JSON.
    fn visit_bool<E: serde::de::Error>(self, b: bool) -> Result<Self::Value, E> {
        Ok(ClauseValue::Text(b.to_string()))
    }

    fn visit_i64<E: serde::de::Error>(self, n: i64) -> Result<Self::Value, E> {
        Ok(ClauseValue::Number(n.into()))
    }

    fn visit_u64<E: serde::de::Error>(self, n: u64) -> Result<Self::Value, E> {
        Ok(ClauseValue::Number(n.into()))
    }

    fn visit_f64<E: serde::de::Error>(self, n: f64) -> Result<Self::Value, E> {
        // Non-finite floats are not representable in JSON.
        Ok(serde_json::Number::from_f64(n)
            .map_or(ClauseValue::Absent, ClauseValue::Number))
    }

    fn visit_str<E: serde::de::Error>(self, s: &str) -> Result<Self::Value, E> {
        Ok(ClauseValue::Text(s.to_owned()))
    }

    fn visit_string<E: serde::de::Error>(self, s: String) -> Result<Self::Value, E> {
        Ok(ClauseValue::Text(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(ClauseValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = ClauseMap::new();
        while let Some((key, value)) = access.next_entry::<String, ClauseValue>()? {
            map.insert(key, value);
        }
        Ok(ClauseValue::Map(map))
    }
}

impl<'de> Deserialize<'de> for ClauseValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ClauseValueVisitor)
    }
}

struct ClauseMapVisitor;

impl<'de> Visitor<'de> for ClauseMapVisitor {
    type Value = ClauseMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object of clauses")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = ClauseMap::new();
        while let Some((key, value)) = access.next_entry::<String, ClauseValue>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for ClauseMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ClauseMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialization_preserves_key_order() {
        let json = r#"{"term": "12mo", "apr": 4.5, "fees": {"late": 50, "early": null}}"#;
        let map: ClauseMap = serde_json::from_str(json).unwrap();

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["term", "apr", "fees"]);

        let fees = map.get("fees").unwrap().as_map().unwrap();
        let subkeys: Vec<&str> = fees.keys().collect();
        assert_eq!(subkeys, vec!["late", "early"]);
        assert_eq!(fees.get("early"), Some(&ClauseValue::Absent));
    }

    #[test]
    fn test_null_and_empty_string_are_distinct_but_both_missing() {
        let null: ClauseValue = serde_json::from_str("null").unwrap();
        let empty: ClauseValue = serde_json::from_str(r#""""#).unwrap();

        assert!(null.is_missing());
        assert!(empty.is_missing());
        assert_ne!(null.canonical(), empty.canonical());
    }

    #[test]
    fn test_round_trip() {
        let json = r#"{"penalties":["late fee","repo"],"term":"36mo","mileage_cap":12000}"#;
        let map: ClauseMap = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&map).unwrap(), json);
    }

    #[test]
    fn test_booleans_become_text() {
        let value: ClauseValue = serde_json::from_str("true").unwrap();
        assert_eq!(value, ClauseValue::Text("true".to_string()));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = ClauseMap::new();
        map.insert("term", ClauseValue::from("12mo"));
        map.insert("apr", ClauseValue::from(5));
        map.insert("term", ClauseValue::from("24mo"));

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["term", "apr"]);
        assert_eq!(map.get("term"), Some(&ClauseValue::from("24mo")));
    }
}
