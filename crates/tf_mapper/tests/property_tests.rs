//! Property-based tests for `tf_mapper`.
//!
//! These tests verify invariants that should hold for all inputs,
//! catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use tf_mapper::prelude::*;
use tf_mapper::{Tag, hash_string};

struct Sample {
    sid: String,
    name: String,
    count: i64,
    enabled: bool,
}

tagged! {
    Sample {
        sid => [terraform = "id"],
        name => [terraform = "name"],
        count => [terraform = "count"],
        enabled => [terraform = "enabled"],
    }
}

fn sample_schema() -> Schema {
    Schema::new()
        .with_attribute("name", Attribute::optional(ValueType::String))
        .with_attribute("count", Attribute::optional(ValueType::Int))
        .with_attribute("enabled", Attribute::optional(ValueType::Bool))
}

fn leak_tags(tags: Vec<Tag>) -> &'static [Tag] {
    Box::leak(tags.into_boxed_slice())
}

fn leak_str(s: String) -> &'static str {
    Box::leak(s.into_boxed_str())
}

/// Builds a record with `tagged` fields carrying distinct `terraform` keys and
/// `untagged` fields carrying only an unrelated tag.
fn synthetic_record(tagged: usize, untagged: usize) -> Record {
    let mut record = Record::new("Synthetic");

    for idx in 0..tagged {
        let key = leak_str(format!("key_{idx}"));
        let tags = leak_tags(vec![Tag::new("terraform", key)]);
        record = record.with_field(leak_str(format!("tagged_{idx}")), tags, i64::try_from(idx).unwrap_or_default());
    }

    for idx in 0..untagged {
        let tags = leak_tags(vec![Tag::new("json", "ignored")]);
        record = record.with_field(leak_str(format!("untagged_{idx}")), tags, Value::Null);
    }

    record
}

proptest! {
    /// The extractor returns exactly one entry per field carrying the tag.
    #[test]
    fn extractor_counts_only_tagged_fields(tagged in 0usize..12, untagged in 0usize..12) {
        let record = Value::Record(synthetic_record(tagged, untagged));
        let mapped = map_value_by_tag(&record, TERRAFORM_TAG).unwrap();

        prop_assert_eq!(mapped.len(), tagged);
    }

    /// Marshaling then reading back each scalar key returns the original value.
    #[test]
    fn marshal_round_trips_scalars(
        sid in "[A-Z]{2}[0-9a-f]{8}",
        name in "\\PC*",
        count in any::<i64>(),
        enabled in any::<bool>(),
    ) {
        let sample = Sample { sid: sid.clone(), name: name.clone(), count, enabled };
        let schema = sample_schema();
        let mut data = MemoryResourceData::new(&schema);

        marshal_to_terraform(&sample, &mut data, &schema).unwrap();

        prop_assert_eq!(data.id(), sid.as_str());
        prop_assert_eq!(data.get("name"), Some(Value::String(name)));
        prop_assert_eq!(data.get("count"), Some(Value::Int(count)));
        prop_assert_eq!(data.get("enabled"), Some(Value::Bool(enabled)));
        prop_assert!(data.get("id").is_none());
    }

    /// String hashing is deterministic and never negative.
    #[test]
    fn hash_string_is_stable_and_non_negative(s in "\\PC*") {
        let code = hash_string(&s);

        prop_assert!(code >= 0);
        prop_assert_eq!(code, hash_string(&s));
    }

    /// Hash codes of equal maps are equal.
    #[test]
    fn map_hash_depends_only_on_contents(power in any::<i64>(), adj in "[a-z]{0,12}") {
        let build = || {
            let mut fields = Fields::new();
            fields.insert("adj".into(), Value::String(adj.clone()));
            fields.insert("power".into(), Value::Int(power));
            Value::Map(fields)
        };

        prop_assert_eq!(simple_hashcode(&build()), simple_hashcode(&build()));
    }
}
