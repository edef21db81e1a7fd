//! Resource schema declarations.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::value::{Fields, Set, Value};

/// Declared type of a schema attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// A string.
    String,
    /// A signed integer.
    Int,
    /// A boolean.
    Bool,
    /// A floating point number.
    Float,
    /// An ordered list; element type given by [`Attribute::elem`].
    List,
    /// A hashed set; element type given by [`Attribute::elem`].
    Set,
    /// A string-keyed map.
    Map,
}

impl ValueType {
    /// Returns `true` for string, int, bool and float.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::String | Self::Int | Self::Bool | Self::Float)
    }

    /// Returns the value an unset attribute of this type reads as.
    #[must_use]
    pub fn zero_value(self) -> Value {
        match self {
            Self::String => Value::String(String::new()),
            Self::Int => Value::Int(0),
            Self::Bool => Value::Bool(false),
            Self::Float => Value::Float(0.0),
            Self::List => Value::List(Vec::new()),
            Self::Set => Value::Set(Set::default()),
            Self::Map => Value::Map(Fields::new()),
        }
    }

    /// Returns `true` if `value` can be stored under this type.
    ///
    /// Nulls are always accepted and integers are accepted for floats.
    #[must_use]
    pub const fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (Self::String, Value::String(_))
                | (Self::Int, Value::Int(_))
                | (Self::Bool, Value::Bool(_))
                | (Self::Float, Value::Float(_) | Value::Int(_))
                | (Self::List, Value::List(_))
                | (Self::Set, Value::Set(_))
                | (Self::Map, Value::Map(_))
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Float => "float",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
        };
        write!(f, "{s}")
    }
}

/// Element description of a list, set or map attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Elem {
    /// Elements are plain values of one type.
    Type(ValueType),
    /// Elements are nested blocks with their own schema.
    Block(Schema),
}

/// One attribute of a resource schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Declared type.
    pub ty: ValueType,
    /// Must be supplied in configuration.
    pub required: bool,
    /// May be supplied in configuration.
    pub optional: bool,
    /// May be filled in by the provider.
    pub computed: bool,
    /// Hidden from plan output.
    pub sensitive: bool,
    /// Human-readable documentation.
    pub description: Option<Box<str>>,
    /// Value read when the attribute is unset.
    pub default: Option<Value>,
    /// Minimum number of elements for lists and sets.
    pub min_items: usize,
    /// Maximum number of elements for lists and sets; `0` means unbounded.
    pub max_items: usize,
    /// Element description for lists, sets and maps.
    pub elem: Option<Elem>,
}

impl Attribute {
    /// Creates an attribute with no flags set.
    #[must_use]
    pub const fn new(ty: ValueType) -> Self {
        Self {
            ty,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            description: None,
            default: None,
            min_items: 0,
            max_items: 0,
            elem: None,
        }
    }

    /// Creates a required attribute.
    #[must_use]
    pub const fn required(ty: ValueType) -> Self {
        let mut attribute = Self::new(ty);
        attribute.required = true;
        attribute
    }

    /// Creates an optional attribute.
    #[must_use]
    pub const fn optional(ty: ValueType) -> Self {
        let mut attribute = Self::new(ty);
        attribute.optional = true;
        attribute
    }

    /// Creates a provider-computed attribute.
    #[must_use]
    pub const fn computed(ty: ValueType) -> Self {
        let mut attribute = Self::new(ty);
        attribute.computed = true;
        attribute
    }

    /// Creates an optional set holding at most one nested block.
    #[must_use]
    pub fn single_block(schema: Schema) -> Self {
        Self::optional(ValueType::Set)
            .with_elem(Elem::Block(schema))
            .with_max_items(1)
    }

    /// Marks the attribute as also computed by the provider.
    #[must_use]
    pub const fn also_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Marks the attribute as sensitive.
    #[must_use]
    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the element description.
    #[must_use]
    pub fn with_elem(mut self, elem: Elem) -> Self {
        self.elem = Some(elem);
        self
    }

    /// Sets the minimum element count.
    #[must_use]
    pub const fn with_min_items(mut self, min_items: usize) -> Self {
        self.min_items = min_items;
        self
    }

    /// Sets the maximum element count.
    #[must_use]
    pub const fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Returns the nested block schema, if the elements are blocks.
    #[must_use]
    pub const fn block(&self) -> Option<&Schema> {
        match &self.elem {
            Some(Elem::Block(schema)) => Some(schema),
            _ => None,
        }
    }

    /// Returns the value an unset attribute reads as.
    #[must_use]
    pub fn default_value(&self) -> Value {
        self.default.clone().unwrap_or_else(|| self.ty.zero_value())
    }

    fn validate(&self, key: &str) -> Result<(), SchemaError> {
        let modes = [self.required, self.optional, self.computed && !self.optional];
        if modes.iter().filter(|&&on| on).count() != 1 {
            return Err(SchemaError::invalid(
                key,
                "exactly one of required, optional or computed must be set",
            ));
        }

        if self.required && self.default.is_some() {
            return Err(SchemaError::invalid(key, "required attributes cannot have a default"));
        }

        if self.default.as_ref().is_some_and(|default| !self.ty.accepts(default)) {
            return Err(SchemaError::invalid(key, "default does not match the declared type"));
        }

        match (self.ty, &self.elem) {
            (ValueType::List | ValueType::Set, None) => {
                return Err(SchemaError::invalid(key, "lists and sets must declare an element type"));
            }
            (ty, Some(_)) if ty.is_scalar() => {
                return Err(SchemaError::invalid(key, "scalar attributes cannot declare elements"));
            }
            (_, Some(Elem::Block(schema))) => {
                schema.validate().map_err(|source| SchemaError::Nested {
                    key: key.into(),
                    source: Box::new(source),
                })?;
            }
            _ => {}
        }

        if self.max_items > 0 && self.max_items < self.min_items {
            return Err(SchemaError::invalid(key, "max_items is smaller than min_items"));
        }

        Ok(())
    }
}

/// An ordered set of named attributes describing one resource or block.
///
/// Schemas are built once and shared by reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    attributes: BTreeMap<Box<str>, Attribute>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Returns `true` if the schema declares `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Iterates over attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(name, attribute)| (&**name, attribute))
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if no attributes are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Checks every attribute, recursing into nested blocks.
    pub fn validate(&self) -> Result<(), SchemaError> {
        self.attributes
            .iter()
            .try_for_each(|(name, attribute)| attribute.validate(name))
    }
}

/// Errors reported by [`Schema::validate`].
#[derive(Debug, Error)]
pub enum SchemaError {
    /// An attribute's flags or element declaration are inconsistent.
    #[error("invalid attribute '{key}': {reason}")]
    InvalidAttribute {
        /// Attribute name.
        key: Box<str>,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// An attribute of a nested block is invalid.
    #[error("in block '{key}': {source}")]
    Nested {
        /// Name of the block attribute.
        key: Box<str>,
        /// The nested error.
        #[source]
        source: Box<SchemaError>,
    },
}

impl SchemaError {
    fn invalid(key: &str, reason: &'static str) -> Self {
        Self::InvalidAttribute { key: key.into(), reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::widget_schema;

    #[test]
    fn widget_schema_is_valid() {
        widget_schema().validate().unwrap();
    }

    #[test]
    fn zero_values_match_types() {
        assert_eq!(ValueType::String.zero_value(), Value::String(String::new()));
        assert_eq!(ValueType::Int.zero_value(), Value::Int(0));
        assert_eq!(ValueType::Bool.zero_value(), Value::Bool(false));
        assert!(matches!(ValueType::Set.zero_value(), Value::Set(ref s) if s.is_empty()));
    }

    #[test]
    fn accepts_null_for_every_type() {
        for ty in [ValueType::String, ValueType::Int, ValueType::Set, ValueType::Map] {
            assert!(ty.accepts(&Value::Null));
        }
    }

    #[test]
    fn float_accepts_integers_but_int_rejects_floats() {
        assert!(ValueType::Float.accepts(&Value::Int(1)));
        assert!(!ValueType::Int.accepts(&Value::Float(1.5)));
        assert!(!ValueType::String.accepts(&Value::Int(1)));
    }

    #[test]
    fn optional_computed_is_a_single_mode() {
        let schema = Schema::new().with_attribute("voice", Attribute::optional(ValueType::String).also_computed());
        schema.validate().unwrap();
    }

    #[test]
    fn rejects_attribute_without_mode() {
        let schema = Schema::new().with_attribute("name", Attribute::new(ValueType::String));
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn rejects_required_with_default() {
        let schema =
            Schema::new().with_attribute("status", Attribute::required(ValueType::String).with_default("active"));
        assert!(schema.validate().is_err());
    }

    #[test]
    fn rejects_default_of_wrong_type() {
        let schema = Schema::new().with_attribute("count", Attribute::optional(ValueType::Int).with_default("ten"));
        assert!(schema.validate().is_err());
    }

    #[test]
    fn rejects_set_without_elem() {
        let schema = Schema::new().with_attribute("stats", Attribute::optional(ValueType::Set));
        assert!(schema.validate().is_err());
    }

    #[test]
    fn rejects_inverted_item_bounds() {
        let schema = Schema::new().with_attribute(
            "stats",
            Attribute::optional(ValueType::List)
                .with_elem(Elem::Type(ValueType::Int))
                .with_min_items(3)
                .with_max_items(1),
        );
        assert!(schema.validate().is_err());
    }

    #[test]
    fn reports_nested_block_errors() {
        let inner = Schema::new().with_attribute("power", Attribute::new(ValueType::Int));
        let schema = Schema::new().with_attribute("stats", Attribute::single_block(inner));

        let err = schema.validate().unwrap_err();
        assert!(matches!(err, SchemaError::Nested { ref key, .. } if &**key == "stats"));
    }

    #[test]
    fn default_value_prefers_declared_default() {
        let attribute = Attribute::optional(ValueType::String).with_default("active");
        assert_eq!(attribute.default_value(), Value::from("active"));
        assert_eq!(Attribute::optional(ValueType::Int).default_value(), Value::Int(0));
    }
}
