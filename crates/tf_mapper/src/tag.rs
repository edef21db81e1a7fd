//! Field descriptor tables for tagged structs.
//!
//! A tagged struct declares, once and at compile time, which of its fields
//! map onto which destination keys. Each field carries zero or more tags of the
//! form `name = "key[,option,...]"`; only the first comma-separated segment is
//! the destination key. The [`tagged!`](crate::tagged) macro generates the
//! descriptor table:
//!
//! ```
//! use tf_mapper::{tagged, Tagged};
//!
//! struct Key {
//!     sid: String,
//!     friendly_name: Option<String>,
//! }
//!
//! tagged! {
//!     Key {
//!         sid => [terraform = "id"],
//!         friendly_name => [terraform = "friendly_name", form = "FriendlyName"],
//!     }
//! }
//!
//! assert_eq!(Key::fields().len(), 2);
//! ```
//!
//! A field may also be computed from the struct with an accessor closure:
//!
//! ```
//! use tf_mapper::tagged;
//!
//! struct Capabilities { sms: bool }
//! struct Number { capabilities: Capabilities }
//!
//! tagged! {
//!     Number {
//!         is_sms_capable(|n: &Number| n.capabilities.sms) => [terraform = "is_sms_capable"],
//!     }
//! }
//! ```

use std::fmt;

use crate::value::Value;

/// A single `name = "key[,option,...]"` annotation on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    /// Tag name, e.g. `"terraform"`.
    pub name: &'static str,
    /// Raw tag value, e.g. `"stats,omitempty"`.
    pub value: &'static str,
}

impl Tag {
    /// Creates a tag.
    #[must_use]
    pub const fn new(name: &'static str, value: &'static str) -> Self {
        Self { name, value }
    }

    /// Returns the destination key: the first comma-separated segment.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.value.split(',').next().map_or("", str::trim)
    }

    /// Returns the options following the destination key.
    pub fn options(&self) -> impl Iterator<Item = &'static str> {
        self.value
            .split(',')
            .skip(1)
            .map(str::trim)
            .filter(|option| !option.is_empty())
    }

    /// Returns `true` if `option` is among the tag's options.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options().any(|o| o == option)
    }
}

/// Compile-time description of one field of a tagged struct.
pub struct FieldDescriptor<T: 'static> {
    /// Rust field (or accessor) name.
    pub name: &'static str,
    /// Tags attached to the field.
    pub tags: &'static [Tag],
    /// Reads the field's current value.
    pub get: fn(&T) -> Value,
}

impl<T: 'static> FieldDescriptor<T> {
    /// Returns the tag named `tag_name`, if the field carries one.
    #[must_use]
    pub fn tag(&self, tag_name: &str) -> Option<&'static Tag> {
        self.tags.iter().find(|tag| tag.name == tag_name)
    }

    /// Reads the field from `src`.
    #[must_use]
    pub fn value(&self, src: &T) -> Value {
        (self.get)(src)
    }
}

impl<T: 'static> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// A struct with a static field descriptor table.
///
/// Implement with the [`tagged!`](crate::tagged) macro rather than by hand.
pub trait Tagged: Sized + 'static {
    /// Returns the struct's type name.
    fn type_name() -> &'static str;

    /// Returns the descriptor table in declaration order.
    fn fields() -> &'static [FieldDescriptor<Self>];

    /// Captures the current field values as a [`Record`].
    fn to_record(&self) -> Record {
        Record::capture(self)
    }
}

/// One captured field of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    /// Rust field (or accessor) name.
    pub name: &'static str,
    /// Tags attached to the field.
    pub tags: &'static [Tag],
    /// The field's value at capture time.
    pub value: Value,
}

impl RecordField {
    /// Returns the tag named `tag_name`, if the field carries one.
    #[must_use]
    pub fn tag(&self, tag_name: &str) -> Option<&'static Tag> {
        self.tags.iter().find(|tag| tag.name == tag_name)
    }
}

/// A type-erased snapshot of a tagged struct.
///
/// Records let nested structs travel inside [`Value`] while keeping their
/// tags, so the extractor can map them again one level down.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: &'static str,
    fields: Vec<RecordField>,
}

impl Record {
    /// Creates an empty record for a dynamically assembled struct.
    #[must_use]
    pub const fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, name: &'static str, tags: &'static [Tag], value: impl Into<Value>) -> Self {
        self.fields.push(RecordField {
            name,
            tags,
            value: value.into(),
        });
        self
    }

    /// Reads every field of `src` through its descriptor table.
    #[must_use]
    pub fn capture<T: Tagged>(src: &T) -> Self {
        Self {
            type_name: T::type_name(),
            fields: T::fields()
                .iter()
                .map(|descriptor| RecordField {
                    name: descriptor.name,
                    tags: descriptor.tags,
                    value: descriptor.value(src),
                })
                .collect(),
        }
    }

    /// Returns the captured struct's type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the captured fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    /// Looks up a field by its Rust name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&RecordField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

/// Implements [`Tagged`] and [`ToValue`](crate::ToValue) for a struct.
///
/// Each entry is `field => [tag = "key", ...]`, `field` alone for an untagged
/// field, or `name(|src: &Type| expr) => [...]` for a computed field.
#[macro_export]
macro_rules! tagged {
    (@get $ty:ident, $field:ident,) => {
        |src: &$ty| $crate::ToValue::to_value(&src.$field)
    };

    (@get $ty:ident, $field:ident, $getter:expr) => {
        |src: &$ty| $crate::ToValue::to_value(&($getter)(src))
    };

    (
        $ty:ident {
            $(
                $field:ident $( ( $getter:expr ) )?
                $( => [ $( $tag:ident = $value:literal ),* $(,)? ] )?
            ),* $(,)?
        }
    ) => {
        impl $crate::Tagged for $ty {
            fn type_name() -> &'static str {
                stringify!($ty)
            }

            fn fields() -> &'static [$crate::FieldDescriptor<Self>] {
                static FIELDS: &[$crate::FieldDescriptor<$ty>] = &[
                    $(
                        $crate::FieldDescriptor {
                            name: stringify!($field),
                            tags: &[ $( $( $crate::Tag::new(stringify!($tag), $value) ),* )? ],
                            get: $crate::tagged!(@get $ty, $field, $($getter)?),
                        },
                    )*
                ];
                FIELDS
            }
        }

        impl $crate::ToValue for $ty {
            fn to_value(&self) -> $crate::Value {
                $crate::Value::Record($crate::Record::capture(self))
            }
        }
    };
}
