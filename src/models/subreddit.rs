use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{self, FieldKind, FieldSpec};
use super::Thing;
use crate::client::error::Result;

/// A subreddit (`t5`), as returned by `/r/{name}/about`
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Subreddit {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub title: String,
    pub url: String,
    pub public_description: Option<String>,
    pub subscribers: Option<i64>,
    pub over18: Option<bool>,
    pub subreddit_type: Option<String>,
    pub created_utc: f64,
}

impl Subreddit {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::String),
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("display_name", FieldKind::String),
        FieldSpec::optional("title", FieldKind::String),
        FieldSpec::required("url", FieldKind::String),
        FieldSpec::optional("public_description", FieldKind::String),
        FieldSpec::optional("subscribers", FieldKind::Integer),
        FieldSpec::optional("over18", FieldKind::Boolean),
        FieldSpec::optional("subreddit_type", FieldKind::String),
        FieldSpec::required("created_utc", FieldKind::Timestamp),
    ];

    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_utc as i64, 0)
    }
}

impl Thing for Subreddit {
    const KIND: &'static str = "t5";

    fn from_data(data: &Value) -> Result<Self> {
        fields::decode(data, Self::FIELDS, "Subreddit")
    }
}
