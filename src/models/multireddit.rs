use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{self, FieldKind, FieldSpec};
use super::Thing;
use crate::client::error::Result;

/// A custom feed combining several subreddits (`LabeledMulti`)
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct MultiReddit {
    pub name: String,
    pub display_name: Option<String>,
    /// e.g. `/user/reddit/m/fun`; listings of the multi live under this path.
    pub path: String,
    pub owner: Option<String>,
    pub description_md: Option<String>,
    pub visibility: Option<String>,
    pub can_edit: bool,
    pub created_utc: Option<f64>,
    pub subreddits: Vec<MultiSubreddit>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct MultiSubreddit {
    pub name: String,
}

impl MultiReddit {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::optional("display_name", FieldKind::String),
        FieldSpec::required("path", FieldKind::String),
        FieldSpec::optional("owner", FieldKind::String),
        FieldSpec::optional("description_md", FieldKind::String),
        FieldSpec::optional("visibility", FieldKind::String),
        FieldSpec::optional("can_edit", FieldKind::Boolean),
        FieldSpec::optional("created_utc", FieldKind::Timestamp),
        FieldSpec::optional("subreddits", FieldKind::Array),
    ];

    /// Build a bare multi from its path, e.g. for a paginator.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            name,
            path,
            ..Self::default()
        }
    }

    pub fn subreddit_names(&self) -> Vec<&str> {
        self.subreddits.iter().map(|s| s.name.as_str()).collect()
    }
}

impl Thing for MultiReddit {
    const KIND: &'static str = "LabeledMulti";

    fn from_data(data: &Value) -> Result<Self> {
        fields::decode(data, Self::FIELDS, "MultiReddit")
    }
}
