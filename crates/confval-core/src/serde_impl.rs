//! Serde bridge for [`Value`].
//!
//! `Value` does not know any wire format itself; this module lets serde-based
//! formats read and write it. Deserializing into a non-default strategy
//! (such as an arena) goes through [`ValueSeed`], which carries the
//! allocator handle down the tree.
//!
//! Objects are written pair by pair in order, duplicates included, and read
//! back the same way. Unsigned integers above `i64::MAX` become floating
//! values. Non-finite floating values (NaN, infinities) have no JSON form and
//! fail to serialize rather than being written as `null`.

use crate::alloc::{Global, Strategy};
use crate::error::Result;
use crate::types::ValueString;
use crate::value::{Storage, Value};
use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

impl<A: Strategy> Serialize for Value<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.storage {
            Storage::Null => serializer.serialize_unit(),
            Storage::Boolean(b) => serializer.serialize_bool(*b),
            Storage::Integer(i) => serializer.serialize_i64(*i),
            Storage::Floating(f) if !f.is_finite() => Err(ser::Error::custom(format_args!(
                "cannot serialize non-finite number {f}"
            ))),
            Storage::Floating(f) => serializer.serialize_f64(*f),
            Storage::String(s) => serializer.serialize_str(s.as_str()),
            Storage::Array(array) => {
                let mut seq = serializer.serialize_seq(Some(array.len()))?;
                for element in array.iter() {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Storage::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (key, value) in object.iter() {
                    map.serialize_entry(key.as_str(), value)?;
                }
                map.end()
            }
        }
    }
}

impl<A: Strategy> Serialize for ValueString<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, A: Strategy + Default> Deserialize<'de> for Value<A> {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        ValueSeed::new(A::default()).deserialize(deserializer)
    }
}

/// Deserializes a [`Value`] whose whole tree is bound to `alloc`.
///
/// ```
/// # #[cfg(feature = "arena")] {
/// use confval_core::{Arena, ValueSeed};
/// use serde::de::DeserializeSeed;
///
/// let arena = Arena::new();
/// let mut de = serde_json::Deserializer::from_str(r#"{"port": 8080}"#);
/// let value = ValueSeed::new(&arena).deserialize(&mut de).unwrap();
/// assert_eq!(value["port"].get::<u16>().unwrap(), 8080);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ValueSeed<A> {
    alloc: A,
}

impl<A: Strategy> ValueSeed<A> {
    pub fn new(alloc: A) -> Self {
        Self { alloc }
    }
}

impl<'de, A: Strategy> DeserializeSeed<'de> for ValueSeed<A> {
    type Value = Value<A>;

    fn deserialize<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Value<A>, D::Error> {
        deserializer.deserialize_any(ValueVisitor { alloc: self.alloc })
    }
}

struct ValueVisitor<A> {
    alloc: A,
}

impl<A: Strategy> ValueVisitor<A> {
    fn build(&self, fill: impl FnOnce(&mut Value<A>)) -> Value<A> {
        let mut value = Value::new_in(self.alloc.clone());
        fill(&mut value);
        value
    }
}

impl<'de, A: Strategy> Visitor<'de> for ValueVisitor<A> {
    type Value = Value<A>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON-like value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value<A>, E> {
        Ok(self.build(|_| {}))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value<A>, E> {
        Ok(self.build(|_| {}))
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Value<A>, D::Error> {
        ValueSeed::new(self.alloc).deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value<A>, E> {
        Ok(self.build(|value| value.set_bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value<A>, E> {
        Ok(self.build(|value| value.set_integer(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value<A>, E> {
        Ok(self.build(|value| match i64::try_from(v) {
            Ok(i) => value.set_integer(i),
            Err(_) => value.set_floating(v as f64),
        }))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value<A>, E> {
        Ok(self.build(|value| value.set_floating(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value<A>, E> {
        Ok(self.build(|value| value.set_string(v)))
    }

    fn visit_seq<S: SeqAccess<'de>>(
        self,
        mut seq: S,
    ) -> std::result::Result<Value<A>, S::Error> {
        let mut value = Value::new_in(self.alloc.clone());
        let array = value.ensure_array();
        while let Some(element) = seq.next_element_seed(ValueSeed::new(self.alloc.clone()))? {
            array.push(element);
        }
        Ok(value)
    }

    fn visit_map<M: MapAccess<'de>>(
        self,
        mut map: M,
    ) -> std::result::Result<Value<A>, M::Error> {
        let mut value = Value::new_in(self.alloc.clone());
        let object = value.ensure_object();
        while let Some(key) = map.next_key::<String>()? {
            let element = map.next_value_seed(ValueSeed::new(self.alloc.clone()))?;
            object.push((ValueString::from_str_in(&key, self.alloc.clone()), element));
        }
        Ok(value)
    }
}

/// Parse a JSON document into a heap-backed [`Value`].
pub fn from_json(json: &str) -> Result<Value<Global>> {
    from_json_in(json, Global)
}

/// Parse a JSON document into a [`Value`] bound to `alloc`.
pub fn from_json_in<A: Strategy>(json: &str, alloc: A) -> Result<Value<A>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let value = ValueSeed::new(alloc).deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

/// Render a [`Value`] as compact JSON.
pub fn to_json<A: Strategy>(value: &Value<A>) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Render a [`Value`] as indented JSON.
pub fn to_json_pretty<A: Strategy>(value: &Value<A>) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
