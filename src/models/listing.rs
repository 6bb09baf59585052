use serde_json::Value;

use super::more::MoreChildren;
use super::Thing;
use crate::client::error::{RedditClientError, Result};

/// One page of a Reddit listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub children: Vec<T>,
    /// Fullname of the last item; `None` when there are no more pages.
    pub after: Option<String>,
    pub before: Option<String>,
    /// "Load more" stubs found among the children, in source order (comment
    /// listings only).
    pub more: Vec<MoreChildren>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            after: None,
            before: None,
            more: Vec::new(),
        }
    }
}

impl<T: Thing> Listing<T> {
    /// Build a listing from the listing's `data` object.
    pub fn from_json(data: &Value) -> Result<Self> {
        let children = data
            .get("children")
            .and_then(Value::as_array)
            .ok_or(RedditClientError::MissingField {
                field: "children",
                variant: "Listing",
            })?;

        let mut listing = Listing {
            children: Vec::with_capacity(children.len()),
            after: cursor(data, "after"),
            before: cursor(data, "before"),
            more: Vec::new(),
        };

        for child in children {
            let kind = child.get("kind").and_then(Value::as_str);
            let child_data = child.get("data").ok_or(RedditClientError::MissingField {
                field: "data",
                variant: "Listing",
            })?;

            if kind == Some(MoreChildren::KIND) && T::KIND != MoreChildren::KIND && T::KIND != "*" {
                listing.more.push(MoreChildren::from_data(child_data)?);
                continue;
            }

            listing.children.push(T::from_child(kind, child_data)?);
        }

        Ok(listing)
    }
}

impl<T> Listing<T> {
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.children.iter()
    }

    /// Whether Reddit handed back a cursor for another page.
    pub fn has_next(&self) -> bool {
        self.after.is_some()
    }

    /// Comments left behind all the "load more" stubs.
    pub fn more_count(&self) -> i64 {
        self.more.iter().map(|more| more.count).sum()
    }

    pub fn into_children(self) -> Vec<T> {
        self.children
    }
}

impl<'a, T> IntoIterator for &'a Listing<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

fn cursor(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Comment, RedditObject, Submission};
    use serde_json::json;

    fn comment(id: &str) -> Value {
        json!({
            "kind": "t1",
            "data": {
                "id": id,
                "name": format!("t1_{id}"),
                "author": "someone",
                "body": format!("comment {id}"),
                "created_utc": 1700000000.0
            }
        })
    }

    #[test]
    fn preserves_order_and_cursor() {
        let data = json!({
            "children": [comment("a"), comment("b"), comment("c")],
            "after": "t1_c",
            "before": null
        });
        let listing: Listing<Comment> = Listing::from_json(&data).unwrap();
        let ids: Vec<&str> = listing.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(listing.after.as_deref(), Some("t1_c"));
        assert_eq!(listing.before, None);
        assert!(listing.has_next());
    }

    #[test]
    fn empty_children_and_null_cursor() {
        let data = json!({"children": [], "after": null, "before": null});
        let listing: Listing<Submission> = Listing::from_json(&data).unwrap();
        assert!(listing.is_empty());
        assert_eq!(listing.after, None);
        assert!(!listing.has_next());
    }

    #[test]
    fn more_stub_is_kept_apart() {
        let data = json!({
            "children": [
                comment("a"),
                {"kind": "more", "data": {
                    "id": "zz", "name": "t1_zz", "count": 12, "depth": 0,
                    "parent_id": "t3_post", "children": ["x1", "x2"]
                }}
            ],
            "after": null
        });
        let listing: Listing<Comment> = Listing::from_json(&data).unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.more.len(), 1);
        assert_eq!(listing.more[0].count, 12);
        assert_eq!(listing.more[0].children, vec!["x1".to_string(), "x2".to_string()]);
    }

    #[test]
    fn every_more_stub_is_kept() {
        let stub = |id: &str, count: i64| {
            json!({"kind": "more", "data": {
                "id": id, "name": format!("t1_{id}"), "count": count, "depth": 1,
                "parent_id": "t1_a", "children": [id]
            }})
        };
        let data = json!({
            "children": [comment("a"), stub("m1", 3), comment("b"), stub("m2", 5)],
            "after": null
        });
        let listing: Listing<Comment> = Listing::from_json(&data).unwrap();
        let ids: Vec<&str> = listing.more.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
        assert_eq!(listing.more_count(), 8);
        assert_eq!(listing.len(), 2);
    }

    #[test]
    fn child_of_another_kind_is_rejected() {
        let data = json!({
            "children": [
                comment("a"),
                {"kind": "t3", "data": {"id": "p", "name": "t3_p", "title": "A post"}}
            ],
            "after": null
        });
        let err = Listing::<Comment>::from_json(&data).unwrap_err();
        assert!(matches!(
            err,
            RedditClientError::UnexpectedKind { expected: "t1", ref found } if found == "t3"
        ));
    }

    #[test]
    fn mixed_listing_parses_into_objects() {
        let data = json!({
            "children": [
                comment("a"),
                {"kind": "t3", "data": {
                    "id": "p", "name": "t3_p", "title": "A post", "author": "someone",
                    "subreddit": "rust", "permalink": "/r/rust/comments/p/", "created_utc": 1.0
                }}
            ],
            "after": "t3_p"
        });
        let listing: Listing<RedditObject> = Listing::from_json(&data).unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.children[0].kind(), "t1");
        assert_eq!(listing.children[1].fullname(), Some("t3_p"));
    }

    #[test]
    fn missing_children_is_an_error() {
        let err = Listing::<Comment>::from_json(&json!({"after": null})).unwrap_err();
        assert!(matches!(
            err,
            RedditClientError::MissingField {
                field: "children",
                variant: "Listing"
            }
        ));
    }
}
