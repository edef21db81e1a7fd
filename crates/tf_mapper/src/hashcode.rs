//! Structural hash codes for set elements.

use sha2::{Digest, Sha256};

use crate::value::Value;

/// Returned by [`simple_hashcode`] for values that are neither records nor maps.
pub const UNSUPPORTED_HASHCODE: i32 = -1;

/// Computes a hash code from the values of a record or map.
///
/// The string form of every value is concatenated in iteration order
/// (declaration order for records, key order for maps, `nil` for nulls) and
/// the buffer is hashed with [`hash_string`]. Any other shape yields
/// [`UNSUPPORTED_HASHCODE`].
#[must_use]
pub fn simple_hashcode(value: &Value) -> i32 {
    let mut buf = String::new();

    match value {
        Value::Record(record) => {
            for field in record.fields() {
                buf.push_str(&field.value.to_string());
            }
        }
        Value::Map(fields) => {
            for value in fields.values() {
                buf.push_str(&value.to_string());
            }
        }
        _ => return UNSUPPORTED_HASHCODE,
    }

    hash_string(&buf)
}

/// Hashes a string to a non-negative `i32`.
///
/// Uses the leading four bytes of the SHA-256 digest with the sign bit cleared.
#[must_use]
pub fn hash_string(s: &str) -> i32 {
    let digest = Sha256::digest(s.as_bytes());
    let code = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]) & 0x7fff_ffff;

    i32::try_from(code).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Record;
    use crate::test_utils::kensa_splat_roller;
    use crate::value::Fields;

    #[test]
    fn hash_string_is_deterministic_and_non_negative() {
        let a = hash_string("groovy");
        let b = hash_string("groovy");

        assert_eq!(a, b);
        assert!(a >= 0);
    }

    #[test]
    fn different_contents_produce_different_codes() {
        assert_ne!(hash_string("groovy"), hash_string("gnarly"));
    }

    #[test]
    fn unsupported_shapes_return_sentinel() {
        assert_eq!(simple_hashcode(&Value::from("x")), UNSUPPORTED_HASHCODE);
        assert_eq!(simple_hashcode(&Value::Int(1)), UNSUPPORTED_HASHCODE);
        assert_eq!(simple_hashcode(&Value::Null), UNSUPPORTED_HASHCODE);
    }

    #[test]
    fn map_hash_follows_value_concatenation() {
        let mut fields = Fields::new();
        fields.insert("adj".into(), Value::from("groovy"));
        fields.insert("power".into(), Value::Int(100));
        fields.insert("range".into(), Value::Null);

        assert_eq!(simple_hashcode(&Value::Map(fields)), hash_string("groovy100nil"));
    }

    #[test]
    fn record_hash_accepts_non_string_fields() {
        let record = Record::capture(&kensa_splat_roller().stats);
        let code = simple_hashcode(&Value::Record(record));

        assert_eq!(code, hash_string("100535groovytrue"));
    }
}
