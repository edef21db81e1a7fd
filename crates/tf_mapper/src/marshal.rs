//! Marshaling tagged structs into resource data.

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::error::{MapError, MarshalError};
use crate::extract::{TERRAFORM_TAG, map_record_by_tag};
use crate::hashcode::simple_hashcode;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema, ValueType};
use crate::tag::{Record, Tagged};
use crate::value::{Fields, Set, Value};

/// Destination key routed to [`ResourceData::set_id`].
pub const TERRAFORM_ID_FIELD_NAME: &str = "id";

enum Write {
    Id(String),
    Attribute { key: String, value: Value },
}

/// Copies every `terraform`-tagged field of `src` into `dest`.
///
/// The field tagged `id` becomes the resource identifier; a null id clears it.
/// Other keys must be declared by `schema`. Set- and list-typed attributes map
/// nested structs into element maps whose keys must be declared by the
/// attribute's block schema. Type errors are detected before anything is
/// written.
pub fn marshal_to_terraform<T, D>(src: &T, dest: &mut D, schema: &Schema) -> Result<(), MarshalError>
where
    T: Tagged,
    D: ResourceData + ?Sized,
{
    marshal_record(&Record::capture(src), dest, schema)
}

/// Like [`marshal_to_terraform`] for a value that must hold a [`Record`].
pub fn marshal_value<D>(src: &Value, dest: &mut D, schema: &Schema) -> Result<(), MarshalError>
where
    D: ResourceData + ?Sized,
{
    match src {
        Value::Record(record) => marshal_record(record, dest, schema),
        other => Err(MapError::NotAStruct { kind: other.kind() }.into()),
    }
}

/// Marshals a captured record into `dest`.
pub fn marshal_record<D>(record: &Record, dest: &mut D, schema: &Schema) -> Result<(), MarshalError>
where
    D: ResourceData + ?Sized,
{
    let mapped = map_record_by_tag(record, TERRAFORM_TAG)?;

    #[cfg(feature = "tracing")]
    debug!(record = record.type_name(), fields = mapped.len(), "marshaling record");

    let mut writes = Vec::with_capacity(mapped.len());
    for (key, value) in mapped {
        if key == TERRAFORM_ID_FIELD_NAME {
            let id = match value {
                Value::Null => String::new(),
                other => other.to_string(),
            };
            writes.push(Write::Id(id));
            continue;
        }

        let attribute = schema
            .get(&key)
            .ok_or_else(|| MarshalError::UnknownAttribute { key: key.as_str().into() })?;
        let value = convert(&key, value, attribute)?;
        writes.push(Write::Attribute { key, value });
    }

    for write in writes {
        match write {
            Write::Id(id) => dest.set_id(&id),
            Write::Attribute { key, value } => {
                #[cfg(feature = "tracing")]
                trace!(key = %key, kind = value.kind(), "setting attribute");

                dest.set(&key, value).map_err(|source| MarshalError::State {
                    key: key.as_str().into(),
                    source,
                })?;
            }
        }
    }

    Ok(())
}

/// Returns the `terraform`-tagged keys of `record` that `schema` does not
/// declare.
///
/// Nested records under block attributes are checked against the block and
/// reported as `parent.child`.
pub fn undeclared_keys(record: &Record, schema: &Schema) -> Result<Vec<String>, MapError> {
    let mut missing = Vec::new();
    collect_undeclared(record, schema, None, &mut missing)?;
    Ok(missing)
}

fn collect_undeclared(
    record: &Record,
    schema: &Schema,
    parent: Option<&str>,
    missing: &mut Vec<String>,
) -> Result<(), MapError> {
    for (key, value) in map_record_by_tag(record, TERRAFORM_TAG)? {
        if parent.is_none() && key == TERRAFORM_ID_FIELD_NAME {
            continue;
        }

        let path = match parent {
            Some(parent) => format!("{parent}.{key}"),
            None => key.clone(),
        };
        let Some(attribute) = schema.get(&key) else {
            missing.push(path);
            continue;
        };
        let Some(block) = attribute.block() else {
            continue;
        };

        match &value {
            Value::Record(nested) => collect_undeclared(nested, block, Some(&path), missing)?,
            Value::List(items) => {
                for item in items {
                    if let Value::Record(nested) = item {
                        collect_undeclared(nested, block, Some(&path), missing)?;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn convert(key: &str, value: Value, attribute: &Attribute) -> Result<Value, MarshalError> {
    let block = attribute.block();
    let converted = match attribute.ty {
        ValueType::Set => nested_set(key, value, block)?,
        ValueType::List => nested_list(key, value, block)?,
        ValueType::Map => nested_map(value)?,
        ValueType::String | ValueType::Int | ValueType::Bool | ValueType::Float => value,
    };

    if attribute.ty.accepts(&converted) {
        Ok(converted)
    } else {
        Err(MarshalError::TypeMismatch {
            key: key.into(),
            expected: attribute.ty,
            kind: converted.kind(),
        })
    }
}

fn nested_set(key: &str, value: Value, block: Option<&Schema>) -> Result<Value, MarshalError> {
    match value {
        Value::Null => Ok(Value::Set(Set::new(simple_hashcode))),
        Value::Set(set) => Ok(Value::Set(set)),
        Value::Record(record) => {
            let fields = block_fields(key, &record, block)?;
            Ok(Value::Set(Set::single(simple_hashcode, Value::Map(fields))))
        }
        other => Err(MarshalError::NotAStructForSet {
            key: key.into(),
            kind: other.kind(),
        }),
    }
}

fn nested_list(key: &str, value: Value, block: Option<&Schema>) -> Result<Value, MarshalError> {
    match value {
        Value::Null => Ok(Value::List(Vec::new())),
        Value::List(items) => items
            .into_iter()
            .map(|item| flatten_element(key, item, block))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        other => Err(MarshalError::TypeMismatch {
            key: key.into(),
            expected: ValueType::List,
            kind: other.kind(),
        }),
    }
}

fn nested_map(value: Value) -> Result<Value, MarshalError> {
    match value {
        Value::Null => Ok(Value::Map(Fields::new())),
        Value::Record(record) => Ok(Value::Map(map_record_by_tag(&record, TERRAFORM_TAG)?)),
        other => Ok(other),
    }
}

fn flatten_element(key: &str, element: Value, block: Option<&Schema>) -> Result<Value, MarshalError> {
    match element {
        Value::Record(record) => Ok(Value::Map(block_fields(key, &record, block)?)),
        other => Ok(other),
    }
}

/// Maps a nested record, converting each entry against `block` when the
/// attribute declares one.
fn block_fields(key: &str, record: &Record, block: Option<&Schema>) -> Result<Fields, MarshalError> {
    let fields = map_record_by_tag(record, TERRAFORM_TAG)?;
    let Some(block) = block else {
        return Ok(fields);
    };

    fields
        .into_iter()
        .map(|(name, value)| {
            let path = format!("{key}.{name}");
            let attribute = block
                .get(&name)
                .ok_or_else(|| MarshalError::UnknownAttribute { key: path.as_str().into() })?;
            let value = convert(&path, value, attribute)?;
            Ok((name, value))
        })
        .collect()
}
