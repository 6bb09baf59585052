//! Declarative field tables for the Reddit thing variants.
//!
//! Every model declares which keys of its `data` object it maps, what JSON type
//! each key must have and whether it is required. [`decode`] checks a payload
//! against that table before handing it to serde, so a schema mismatch is
//! reported with the field and variant names instead of a generic serde message.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::error::{RedditClientError, Result};

/// Semantic type of a mapped attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    /// Seconds since the epoch; Reddit sends these as floats.
    Timestamp,
    Object,
    Array,
    /// Anything goes, e.g. `edited` which is either `false` or a timestamp.
    Any,
}

impl FieldKind {
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::Timestamp => "timestamp",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
            FieldKind::Any => "value",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Float | FieldKind::Timestamp => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Object => value.is_object(),
            FieldKind::Array => value.is_array(),
            FieldKind::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Check `data` against `fields`. A `null` counts as missing.
pub fn validate(data: &Value, fields: &[FieldSpec], variant: &'static str) -> Result<()> {
    if !data.is_object() {
        return Err(RedditClientError::FieldType {
            field: "data",
            variant,
            expected: FieldKind::Object.name(),
        });
    }

    for spec in fields {
        match data.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    return Err(RedditClientError::MissingField {
                        field: spec.name,
                        variant,
                    });
                }
            }
            Some(value) if !spec.kind.accepts(value) => {
                return Err(RedditClientError::FieldType {
                    field: spec.name,
                    variant,
                    expected: spec.kind.name(),
                });
            }
            Some(_) => {}
        }
    }

    Ok(())
}

/// Validate `data` and map it onto `T`. Keys not in the table are ignored.
///
/// `null` values are dropped before deserializing so that optional fields fall
/// back to their `Default`, the same as when the key is absent.
pub fn decode<T: DeserializeOwned>(
    data: &Value,
    fields: &[FieldSpec],
    variant: &'static str,
) -> Result<T> {
    validate(data, fields, variant)?;
    let data = without_nulls(data);
    T::deserialize(&data).map_err(|source| RedditClientError::Parse {
        raw: data.to_string().chars().take(500).collect(),
        rate_limit_suspected: false,
        source,
    })
}

fn without_nulls(data: &Value) -> Value {
    match data {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}
