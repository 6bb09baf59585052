use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{self, FieldKind, FieldSpec};
use super::Thing;
use crate::client::error::Result;

/// Placeholder for comments Reddit did not include in a comment listing
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct MoreChildren {
    pub id: String,
    pub name: String,
    pub count: i64,
    pub depth: i64,
    pub parent_id: Option<String>,
    /// Ids of the comments that were left out.
    pub children: Vec<String>,
}

impl MoreChildren {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::String),
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::optional("count", FieldKind::Integer),
        FieldSpec::optional("depth", FieldKind::Integer),
        FieldSpec::optional("parent_id", FieldKind::String),
        FieldSpec::optional("children", FieldKind::Array),
    ];
}

impl Thing for MoreChildren {
    const KIND: &'static str = "more";

    fn from_data(data: &Value) -> Result<Self> {
        fields::decode(data, Self::FIELDS, "MoreChildren")
    }
}
