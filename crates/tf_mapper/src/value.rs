//! Typed values flowing between tagged records, schemas and resource data.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::hashcode::simple_hashcode;
use crate::tag::Record;

/// String-keyed field values, ordered by key.
pub type Fields = BTreeMap<String, Value>;

/// Element identity function used by [`Set`].
pub type HashFn = fn(&Value) -> i32;

/// A single value as seen by the mapper and the resource data container.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value (an absent optional field).
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A string-keyed map of values.
    Map(Fields),
    /// A hashed set of values.
    Set(Set),
    /// A captured tagged struct.
    Record(Record),
}

impl Value {
    /// Returns a short name for the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Set(_) => "set",
            Self::Record(_) => "record",
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string slice if this is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`Value::Int`].
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the boolean if this is a [`Value::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number as a float, widening integers.
    #[must_use]
    #[allow(clippy::cast_precision_loss, reason = "state integers are well below 2^52")]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Value::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the fields if this is a [`Value::Map`].
    #[must_use]
    pub const fn as_map(&self) -> Option<&Fields> {
        match self {
            Self::Map(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns the set if this is a [`Value::Set`].
    #[must_use]
    pub const fn as_set(&self) -> Option<&Set> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Returns the record if this is a [`Value::Record`].
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(items) => write_joined(f, '[', ']', items.iter()),
            Self::Set(set) => write_joined(f, '[', ']', set.iter()),
            Self::Record(record) => write_joined(f, '{', '}', record.fields().iter().map(|field| &field.value)),
            Self::Map(fields) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    open: char,
    close: char,
    values: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    write!(f, "{open}")?;
    for (idx, value) in values.enumerate() {
        if idx > 0 {
            write!(f, " ")?;
        }
        write!(f, "{value}")?;
    }
    write!(f, "{close}")
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
            Self::Map(fields) => fields.serialize(serializer),
            Self::Set(set) => {
                let mut seq = serializer.serialize_seq(Some(set.len()))?;
                for element in set.iter() {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Self::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.fields().len()))?;
                for field in record.fields() {
                    map.serialize_entry(field.name, &field.value)?;
                }
                map.end()
            }
        }
    }
}

/// A collection of values keyed by a hash of each element.
///
/// Adding an element whose hash is already present replaces the earlier
/// element, so the hash function defines element identity. Iteration follows
/// ascending hash order.
#[derive(Clone)]
pub struct Set {
    hash: HashFn,
    elements: BTreeMap<i32, Value>,
}

impl Set {
    /// Creates an empty set using `hash` for element identity.
    #[must_use]
    pub fn new(hash: HashFn) -> Self {
        Self {
            hash,
            elements: BTreeMap::new(),
        }
    }

    /// Creates a set holding exactly one element.
    #[must_use]
    pub fn single(hash: HashFn, element: Value) -> Self {
        let mut set = Self::new(hash);
        set.add(element);
        set
    }

    /// Adds an element and returns its hash code.
    pub fn add(&mut self, element: Value) -> i32 {
        let code = (self.hash)(&element);
        self.elements.insert(code, element);
        code
    }

    /// Returns `true` if an element with the same hash code is present.
    #[must_use]
    pub fn contains(&self, element: &Value) -> bool {
        self.elements.contains_key(&(self.hash)(element))
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the elements in hash order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.elements.values()
    }

    /// Returns the elements as a list in hash order.
    #[must_use]
    pub fn list(&self) -> Vec<&Value> {
        self.iter().collect()
    }
}

impl Default for Set {
    fn default() -> Self {
        Self::new(simple_hashcode)
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.elements.values()).finish()
    }
}

/// Conversion from a Rust field into a [`Value`].
///
/// Implemented for the scalar types used by API records, for `Option`, `Vec`
/// and string-keyed maps of those, and by [`tagged!`](crate::tagged) for every
/// tagged struct so that nested structs become [`Value::Record`].
pub trait ToValue {
    /// Converts a borrowed field into an owned value.
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl ToValue for &str {
    fn to_value(&self) -> Value {
        Value::String((*self).to_owned())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl ToValue for i32 {
    fn to_value(&self) -> Value {
        Value::Int(i64::from(*self))
    }
}

impl ToValue for u32 {
    fn to_value(&self) -> Value {
        Value::Int(i64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.clone(), v.to_value())).collect())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self {
        Self::Map(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_hash(_: &Value) -> i32 {
        7
    }

    #[test]
    fn option_none_becomes_null() {
        let missing: Option<String> = None;
        assert_eq!(missing.to_value(), Value::Null);
        assert_eq!(Some(5_i32).to_value(), Value::Int(5));
    }

    #[test]
    fn vec_becomes_list() {
        let costs = vec![5_i64, 10, 15];
        assert_eq!(
            costs.to_value(),
            Value::List(vec![Value::Int(5), Value::Int(10), Value::Int(15)])
        );
    }

    #[test]
    fn as_float_widens_integers() {
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::String("3".into()).as_float(), None);
    }

    #[test]
    fn display_renders_null_as_nil() {
        assert_eq!(Value::Null.to_string(), "nil");
    }

    #[test]
    fn display_renders_maps_in_key_order() {
        let mut fields = Fields::new();
        fields.insert("b".into(), Value::Int(2));
        fields.insert("a".into(), Value::from("x"));
        assert_eq!(Value::Map(fields).to_string(), "{a:x b:2}");
    }

    #[test]
    fn set_replaces_elements_with_equal_hash() {
        let mut set = Set::new(constant_hash);
        set.add(Value::Int(1));
        set.add(Value::Int(2));

        assert_eq!(set.len(), 1);
        assert_eq!(set.list(), vec![&Value::Int(2)]);
    }

    #[test]
    fn sets_compare_by_elements_only() {
        let a = Set::single(constant_hash, Value::Int(1));
        let b = Set::single(constant_hash, Value::Int(1));
        assert_eq!(a, b);
    }

    #[test]
    fn serializes_set_as_array() {
        let mut fields = Fields::new();
        fields.insert("power".into(), Value::Int(10));
        let value = Value::Set(Set::single(simple_hashcode, Value::Map(fields)));

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[{"power":10}]"#);
    }

    #[test]
    fn serializes_null_as_json_null() {
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
    }
}
