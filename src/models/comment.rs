use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{self, FieldKind, FieldSpec};
use super::listing::Listing;
use super::Thing;
use crate::client::error::Result;

/// A comment (`t1`), possibly with its own tree of replies
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub author: String,
    pub body: String,
    pub body_html: Option<String>,
    pub created_utc: f64,

    pub link_id: Option<String>,
    pub parent_id: Option<String>,
    pub subreddit: Option<String>,
    pub permalink: Option<String>,

    pub score: i64,
    pub depth: i64,
    pub stickied: bool,
    pub distinguished: Option<String>,
    pub edited: Value, // `false` or an edit timestamp

    /// Nested replies; Reddit sends an empty string when there are none.
    #[serde(skip)]
    pub replies: Option<Listing<Comment>>,
}

impl Comment {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::String),
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("author", FieldKind::String),
        FieldSpec::required("body", FieldKind::String),
        FieldSpec::optional("body_html", FieldKind::String),
        FieldSpec::required("created_utc", FieldKind::Timestamp),
        FieldSpec::optional("link_id", FieldKind::String),
        FieldSpec::optional("parent_id", FieldKind::String),
        FieldSpec::optional("subreddit", FieldKind::String),
        FieldSpec::optional("permalink", FieldKind::String),
        FieldSpec::optional("score", FieldKind::Integer),
        FieldSpec::optional("depth", FieldKind::Integer),
        FieldSpec::optional("stickied", FieldKind::Boolean),
        FieldSpec::optional("distinguished", FieldKind::String),
        FieldSpec::optional("edited", FieldKind::Any),
        FieldSpec::optional("replies", FieldKind::Any),
    ];

    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_utc as i64, 0)
    }

    /// Replies directly below this comment.
    pub fn replies(&self) -> &[Comment] {
        self.replies
            .as_ref()
            .map(|listing| listing.children.as_slice())
            .unwrap_or_default()
    }

    /// Number of comments in this subtree, this one included.
    pub fn tree_size(&self) -> usize {
        1 + self.replies().iter().map(Comment::tree_size).sum::<usize>()
    }
}

impl Thing for Comment {
    const KIND: &'static str = "t1";

    fn from_data(data: &Value) -> Result<Self> {
        let mut comment: Comment = fields::decode(data, Self::FIELDS, "Comment")?;

        if let Some(replies) = data.get("replies").and_then(|r| r.get("data")) {
            comment.replies = Some(Listing::from_json(replies)?);
        }

        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::error::RedditClientError;
    use serde_json::json;

    fn comment_data(id: &str, replies: Value) -> Value {
        json!({
            "id": id,
            "name": format!("t1_{id}"),
            "author": "ferris",
            "body": "crab",
            "created_utc": 1700000000.0,
            "score": 42,
            "edited": false,
            "replies": replies,
            "all_awardings": []
        })
    }

    #[test]
    fn parses_fields() {
        let comment = Comment::from_data(&comment_data("c1", json!(""))).unwrap();
        assert_eq!(comment.id, "c1");
        assert_eq!(comment.name, "t1_c1");
        assert_eq!(comment.score, 42);
        assert_eq!(comment.edited, json!(false));
        assert!(comment.replies.is_none());
        assert_eq!(comment.created().unwrap().timestamp(), 1700000000);
    }

    #[test]
    fn null_score_defaults_to_zero() {
        let mut data = comment_data("c1", Value::Null);
        data["score"] = Value::Null;
        data["stickied"] = Value::Null;
        let comment = Comment::from_data(&data).unwrap();
        assert_eq!(comment.score, 0);
        assert!(!comment.stickied);
        assert!(comment.replies.is_none());
    }

    #[test]
    fn parses_nested_replies() {
        let reply = json!({"kind": "t1", "data": comment_data("c2", json!(""))});
        let data = comment_data(
            "c1",
            json!({"kind": "Listing", "data": {"children": [reply], "after": null}}),
        );
        let comment = Comment::from_data(&data).unwrap();
        assert_eq!(comment.replies().len(), 1);
        assert_eq!(comment.replies()[0].id, "c2");
        assert_eq!(comment.tree_size(), 2);
    }

    #[test]
    fn missing_body_is_reported() {
        let mut data = comment_data("c1", json!(""));
        data.as_object_mut().unwrap().remove("body");
        let err = Comment::from_data(&data).unwrap_err();
        assert!(matches!(
            err,
            RedditClientError::MissingField {
                field: "body",
                variant: "Comment"
            }
        ));
    }

    #[test]
    fn serialization_round_trips_mapped_fields() {
        let comment = Comment::from_data(&comment_data("c1", json!(""))).unwrap();
        let value = serde_json::to_value(&comment).unwrap();
        assert_eq!(Comment::from_data(&value).unwrap(), comment);
    }
}
