//! Struct-to-map field extraction.

use crate::error::MapError;
use crate::tag::{Record, Tagged};
use crate::value::{Fields, Value};

/// Tag name read by the Terraform marshaler.
pub const TERRAFORM_TAG: &str = "terraform";

/// Maps every field of `src` tagged with `tag_name` to its destination key.
///
/// Fields without the tag, or whose tag has an empty key, are skipped. Nested
/// structs are returned as [`Value::Record`] without being flattened.
pub fn map_struct_by_tag<T: Tagged>(src: &T, tag_name: &str) -> Result<Fields, MapError> {
    map_record_by_tag(&Record::capture(src), tag_name)
}

/// Like [`map_struct_by_tag`] for a value that must hold a [`Record`].
///
/// Fails with [`MapError::NotAStruct`] for any other value, including
/// [`Value::Null`].
pub fn map_value_by_tag(src: &Value, tag_name: &str) -> Result<Fields, MapError> {
    match src {
        Value::Record(record) => map_record_by_tag(record, tag_name),
        other => Err(MapError::NotAStruct { kind: other.kind() }),
    }
}

/// Maps the fields of a captured record tagged with `tag_name`.
pub fn map_record_by_tag(record: &Record, tag_name: &str) -> Result<Fields, MapError> {
    let mut result = Fields::new();

    for field in record.fields() {
        let Some(tag) = field.tag(tag_name) else {
            continue;
        };

        let key = tag.key();
        if key.is_empty() {
            continue;
        }

        if result.insert(key.to_owned(), field.value.clone()).is_some() {
            return Err(MapError::DuplicateKey {
                type_name: record.type_name().into(),
                key: key.into(),
            });
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{Weapon, kensa_splat_roller};

    #[test]
    fn maps_one_entry_per_tagged_field() {
        let weapon = kensa_splat_roller();
        let mapped = map_struct_by_tag(&weapon, TERRAFORM_TAG).unwrap();

        assert_eq!(mapped.len(), 5);
        assert_eq!(mapped["id"], Value::from("TK1337"));
        assert_eq!(mapped["name"], Value::from("Kensa Splat Roller"));
        assert_eq!(mapped["manufacturer_name"], Value::from("Toni Kensa"));
        assert!(!mapped.contains_key("lol"));
    }

    #[test]
    fn keeps_list_fields_as_lists() {
        let mapped = map_struct_by_tag(&kensa_splat_roller(), TERRAFORM_TAG).unwrap();

        let costs: Vec<_> = [5, 10, 15, 20, 25].into_iter().map(Value::Int).collect();
        assert_eq!(mapped["power_up_costs"], Value::List(costs));
    }

    #[test]
    fn returns_nested_structs_unflattened() {
        let mapped = map_struct_by_tag(&kensa_splat_roller(), TERRAFORM_TAG).unwrap();

        let stats = mapped["stats"].as_record().unwrap();
        assert_eq!(stats.type_name(), "WeaponStats");
    }

    #[test]
    fn maps_by_the_requested_tag_only() {
        let mapped = map_struct_by_tag(&kensa_splat_roller(), "notthetagyourelookingfor").unwrap();

        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped["lol"], Value::Int(0));
    }

    #[test]
    fn unknown_tag_yields_empty_map() {
        let mapped = map_struct_by_tag(&kensa_splat_roller(), "json").unwrap();
        assert!(mapped.is_empty());
    }

    #[test]
    fn rejects_null_source() {
        let err = map_value_by_tag(&Value::Null, TERRAFORM_TAG).unwrap_err();
        assert!(matches!(err, MapError::NotAStruct { kind: "null" }));
    }

    #[test]
    fn rejects_non_struct_source() {
        let err = map_value_by_tag(&Value::from("weapon"), TERRAFORM_TAG).unwrap_err();
        assert!(matches!(err, MapError::NotAStruct { kind: "string" }));
    }

    #[test]
    fn maps_record_held_in_value() {
        let value = Value::Record(Record::capture(&kensa_splat_roller()));
        let mapped = map_value_by_tag(&value, TERRAFORM_TAG).unwrap();
        assert_eq!(mapped.len(), 5);
    }

    #[test]
    fn rejects_duplicate_destination_keys() {
        struct Clash {
            a: String,
            b: String,
        }

        crate::tagged! {
            Clash {
                a => [terraform = "name"],
                b => [terraform = "name,computed"],
            }
        }

        let clash = Clash {
            a: "first".into(),
            b: "second".into(),
        };
        let err = map_struct_by_tag(&clash, TERRAFORM_TAG).unwrap_err();
        assert!(matches!(err, MapError::DuplicateKey { ref key, .. } if &**key == "name"));
    }

    #[test]
    fn skips_fields_with_empty_key() {
        struct Blank {
            a: String,
        }

        crate::tagged! {
            Blank {
                a => [terraform = ""],
            }
        }

        let mapped = map_struct_by_tag(&Blank { a: "x".into() }, TERRAFORM_TAG).unwrap();
        assert!(mapped.is_empty());
    }

    #[test]
    fn weapon_descriptor_table_covers_every_field() {
        assert_eq!(<Weapon as Tagged>::fields().len(), 6);
    }
}
