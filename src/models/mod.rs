use serde_json::Value;

use crate::client::error::{RedditClientError, Result};

pub mod account;
pub mod comment;
pub mod fields;
pub mod listing;
pub mod more;
pub mod multireddit;
pub mod submission;
pub mod subreddit;

pub use account::Account;
pub use comment::Comment;
pub use listing::Listing;
pub use more::MoreChildren;
pub use multireddit::MultiReddit;
pub use submission::Submission;
pub use subreddit::Subreddit;

/// A Reddit object that can be built from its JSON representation.
pub trait Thing: Sized {
    /// The `kind` tag Reddit puts next to `data`, e.g. `t1` for comments.
    const KIND: &'static str;

    /// Build the object from its `data` object.
    fn from_data(data: &Value) -> Result<Self>;

    /// Build the object from a listing child. `kind` is the child's tag, if any;
    /// a tag other than [`Thing::KIND`] is rejected.
    fn from_child(kind: Option<&str>, data: &Value) -> Result<Self> {
        match kind {
            Some(kind) if kind != Self::KIND => Err(RedditClientError::UnexpectedKind {
                expected: Self::KIND,
                found: kind.to_string(),
            }),
            _ => Self::from_data(data),
        }
    }

    /// Build the object from a whole response tree shaped `{kind, data}`.
    fn from_tree(tree: &Value) -> Result<Self> {
        if let Some(kind) = tree.get("kind").and_then(Value::as_str) {
            if kind != Self::KIND {
                return Err(RedditClientError::UnexpectedKind {
                    expected: Self::KIND,
                    found: kind.to_string(),
                });
            }
        }

        let data = tree.get("data").ok_or(RedditClientError::MissingField {
            field: "data",
            variant: Self::KIND,
        })?;
        Self::from_data(data)
    }
}

/// Any of the things this crate knows how to parse, picked by `kind`.
#[derive(Debug, Clone, PartialEq)]
pub enum RedditObject {
    Comment(Comment),
    Account(Account),
    Submission(Submission),
    Subreddit(Subreddit),
    MultiReddit(MultiReddit),
    More(MoreChildren),
}

impl RedditObject {
    pub fn kind(&self) -> &'static str {
        match self {
            RedditObject::Comment(_) => Comment::KIND,
            RedditObject::Account(_) => Account::KIND,
            RedditObject::Submission(_) => Submission::KIND,
            RedditObject::Subreddit(_) => Subreddit::KIND,
            RedditObject::MultiReddit(_) => MultiReddit::KIND,
            RedditObject::More(_) => MoreChildren::KIND,
        }
    }

    /// Fullname (`t3_abc123`) where the variant has one.
    pub fn fullname(&self) -> Option<&str> {
        match self {
            RedditObject::Comment(c) => Some(&c.name),
            RedditObject::Account(a) => a.fullname.as_deref(),
            RedditObject::Submission(s) => Some(&s.name),
            RedditObject::Subreddit(s) => Some(&s.name),
            RedditObject::MultiReddit(_) => None,
            RedditObject::More(m) => Some(&m.name),
        }
    }
}

impl Thing for RedditObject {
    const KIND: &'static str = "*";

    fn from_data(_data: &Value) -> Result<Self> {
        Err(RedditClientError::UnexpectedKind {
            expected: "a tagged thing",
            found: String::new(),
        })
    }

    fn from_child(kind: Option<&str>, data: &Value) -> Result<Self> {
        let kind = kind.unwrap_or_default();
        Ok(match kind {
            k if k == Comment::KIND => RedditObject::Comment(Comment::from_data(data)?),
            k if k == Account::KIND => RedditObject::Account(Account::from_data(data)?),
            k if k == Submission::KIND => RedditObject::Submission(Submission::from_data(data)?),
            k if k == Subreddit::KIND => RedditObject::Subreddit(Subreddit::from_data(data)?),
            k if k == MultiReddit::KIND => {
                RedditObject::MultiReddit(MultiReddit::from_data(data)?)
            }
            k if k == MoreChildren::KIND => RedditObject::More(MoreChildren::from_data(data)?),
            other => {
                return Err(RedditClientError::UnexpectedKind {
                    expected: "a known thing kind",
                    found: other.to_string(),
                })
            }
        })
    }

    fn from_tree(tree: &Value) -> Result<Self> {
        // The submission-with-comments shape has no kind at the top level
        if tree.is_array() {
            return Ok(RedditObject::Submission(Submission::from_tree(tree)?));
        }

        let data = tree.get("data").ok_or(RedditClientError::MissingField {
            field: "data",
            variant: "Thing",
        })?;
        Self::from_child(tree.get("kind").and_then(Value::as_str), data)
    }
}

/// Parse a response tree into whichever thing its `kind` names.
pub fn parse_any(tree: &Value) -> Result<RedditObject> {
    RedditObject::from_tree(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dispatches_on_kind() {
        let tree = json!({
            "kind": "t2",
            "data": {"id": "1w72", "name": "spez", "created_utc": 1118030400.0}
        });
        let object = parse_any(&tree).unwrap();
        assert_eq!(object.kind(), "t2");
        match object {
            RedditObject::Account(account) => assert_eq!(account.name, "spez"),
            other => panic!("unexpected object: {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let tree = json!({"kind": "t9", "data": {}});
        let err = parse_any(&tree).unwrap_err();
        assert!(matches!(
            err,
            RedditClientError::UnexpectedKind { ref found, .. } if found == "t9"
        ));
    }

    #[test]
    fn typed_parse_checks_kind() {
        let tree = json!({"kind": "t5", "data": {"id": "x"}});
        let err = Comment::from_tree(&tree).unwrap_err();
        assert!(matches!(
            err,
            RedditClientError::UnexpectedKind {
                expected: "t1",
                ..
            }
        ));
    }

    #[test]
    fn missing_data_is_reported() {
        let err = Account::from_tree(&json!({"kind": "t2"})).unwrap_err();
        assert!(matches!(
            err,
            RedditClientError::MissingField { field: "data", .. }
        ));
    }
}
