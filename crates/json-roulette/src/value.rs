//! Generated document trees.
//!
//! A [`GeneratedValue`] is built top-down once per document and owned
//! exclusively by its parent container; no subtree is ever shared.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number, Value};

/// One node of a generated JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    /// JSON `null`.
    Null,
    /// A string leaf.
    String(String),
    /// An integer leaf.
    Integer(i64),
    /// A floating-point leaf.
    Double(f64),
    /// A boolean leaf.
    Boolean(bool),
    /// A keyed composite.
    Object(ObjectNode),
    /// An ordered composite.
    Array(Vec<GeneratedValue>),
}

impl GeneratedValue {
    /// Returns `true` for objects and arrays.
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }

    /// Returns `true` for JSON `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the number of direct children of a composite node.
    #[must_use]
    pub fn child_count(&self) -> Option<usize> {
        match self {
            Self::Object(object) => Some(object.len()),
            Self::Array(items) => Some(items.len()),
            Self::Null | Self::String(_) | Self::Integer(_) | Self::Double(_) | Self::Boolean(_) => {
                None
            }
        }
    }

    /// Returns the nesting level of composites below and including this node.
    ///
    /// Leaves and nulls report `0`; a composite holding only leaves reports
    /// `1`, matching the depth numbering the generator starts from.
    #[must_use]
    pub fn composite_depth(&self) -> usize {
        match self {
            Self::Object(object) => {
                1 + object
                    .values()
                    .map(Self::composite_depth)
                    .max()
                    .unwrap_or(0)
            }
            Self::Array(items) => 1 + items.iter().map(Self::composite_depth).max().unwrap_or(0),
            Self::Null | Self::String(_) | Self::Integer(_) | Self::Double(_) | Self::Boolean(_) => {
                0
            }
        }
    }

    /// Visits this node and every descendant in pre-order.
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&Self),
    {
        visit(self);
        match self {
            Self::Object(object) => object.values().for_each(|child| child.walk(visit)),
            Self::Array(items) => items.iter().for_each(|child| child.walk(visit)),
            Self::Null | Self::String(_) | Self::Integer(_) | Self::Double(_) | Self::Boolean(_) => {}
        }
    }
}

/// Insertion-ordered field map with unique keys.
///
/// Inserting an existing key replaces its value in place, so the key keeps
/// the position of its first insertion. Equality ignores key order.
#[derive(Debug, Clone, Default)]
pub struct ObjectNode {
    fields: Vec<(String, GeneratedValue)>,
}

impl ObjectNode {
    /// Creates an empty object with room for `capacity` fields.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Sets `name` to `value`, overwriting any previous value for `name`.
    pub fn insert(&mut self, name: String, value: GeneratedValue) {
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Returns the value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GeneratedValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the object has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GeneratedValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates over field values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &GeneratedValue> {
        self.fields.iter().map(|(_, value)| value)
    }
}

impl PartialEq for ObjectNode {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|theirs| theirs == value))
    }
}

impl FromIterator<(String, GeneratedValue)> for ObjectNode {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, GeneratedValue)>,
    {
        let mut object = Self::default();
        for (name, value) in iter {
            object.insert(name, value);
        }
        object
    }
}

impl Serialize for GeneratedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::String(text) => serializer.serialize_str(text),
            Self::Integer(number) => serializer.serialize_i64(*number),
            Self::Double(number) => serializer.serialize_f64(*number),
            Self::Boolean(flag) => serializer.serialize_bool(*flag),
            Self::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (key, value) in object.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl From<GeneratedValue> for Value {
    fn from(value: GeneratedValue) -> Self {
        match value {
            GeneratedValue::Null => Self::Null,
            GeneratedValue::String(text) => Self::String(text),
            GeneratedValue::Integer(number) => Self::Number(number.into()),
            GeneratedValue::Double(number) => Number::from_f64(number).map_or(Self::Null, Self::Number),
            GeneratedValue::Boolean(flag) => Self::Bool(flag),
            GeneratedValue::Object(object) => Self::Object(
                object
                    .fields
                    .into_iter()
                    .map(|(key, child)| (key, Self::from(child)))
                    .collect::<Map<String, Self>>(),
            ),
            GeneratedValue::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
        }
    }
}

impl From<Value> for GeneratedValue {
    /// Rebuilds a tree from parsed JSON.
    ///
    /// Numbers that fit an `i64` become integers; every other number becomes
    /// a double.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Boolean(flag),
            Value::Number(number) => number.as_i64().map_or_else(
                || Self::Double(number.as_f64().unwrap_or(f64::NAN)),
                Self::Integer,
            ),
            Value::String(text) => Self::String(text),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, child)| (key, Self::from(child)))
                    .collect(),
            ),
        }
    }
}
