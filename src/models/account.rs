use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{self, FieldKind, FieldSpec};
use super::Thing;
use crate::client::error::Result;

/// A Reddit user (`t2`)
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub created_utc: f64,
    pub link_karma: i64,
    pub comment_karma: i64,
    pub is_gold: bool,
    pub is_mod: bool,
    pub has_verified_email: Option<bool>,
    pub icon_img: Option<String>,
    /// `t2_` + id; not part of the wire data, filled in after parsing.
    #[serde(skip)]
    pub fullname: Option<String>,
}

impl Account {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::String),
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("created_utc", FieldKind::Timestamp),
        FieldSpec::optional("link_karma", FieldKind::Integer),
        FieldSpec::optional("comment_karma", FieldKind::Integer),
        FieldSpec::optional("is_gold", FieldKind::Boolean),
        FieldSpec::optional("is_mod", FieldKind::Boolean),
        FieldSpec::optional("has_verified_email", FieldKind::Boolean),
        FieldSpec::optional("icon_img", FieldKind::String),
    ];

    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_utc as i64, 0)
    }

    pub fn total_karma(&self) -> i64 {
        self.link_karma + self.comment_karma
    }
}

impl Thing for Account {
    const KIND: &'static str = "t2";

    fn from_data(data: &Value) -> Result<Self> {
        let mut account: Account = fields::decode(data, Self::FIELDS, "Account")?;
        account.fullname = Some(format!("{}_{}", Self::KIND, account.id));
        Ok(account)
    }
}
