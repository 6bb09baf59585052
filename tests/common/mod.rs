#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use redrust::client::{HttpTransport, RestResponse, Result};
use serde_json::{json, Value};

/// A request the paginator made: path plus query pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Recorded {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Serves canned bodies in order and records every request.
#[derive(Default)]
pub struct MockTransport {
    bodies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<Recorded>>,
}

impl MockTransport {
    pub fn new(bodies: Vec<Value>) -> Self {
        Self::with_raw(bodies.into_iter().map(|b| b.to_string()).collect())
    }

    pub fn with_raw(bodies: Vec<String>) -> Self {
        Self {
            bodies: Mutex::new(bodies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<RestResponse> {
        self.requests.lock().unwrap().push(Recorded {
            path: path.to_string(),
            query: query.to_vec(),
        });
        let body = self
            .bodies
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock transport ran out of responses");
        RestResponse::from_parts(
            200,
            vec![("Content-Type".to_string(), "application/json".to_string())],
            body.as_bytes(),
        )
    }
}

pub fn post(id: &str) -> Value {
    json!({
        "kind": "t3",
        "data": {
            "id": id,
            "name": format!("t3_{id}"),
            "title": format!("Post {id}"),
            "author": "ferris",
            "subreddit": "rust",
            "permalink": format!("/r/rust/comments/{id}/"),
            "url": format!("https://example.com/{id}"),
            "created_utc": 1700000000.0,
            "score": 10,
            "num_comments": 0
        }
    })
}

pub fn comment(id: &str) -> Value {
    json!({
        "kind": "t1",
        "data": {
            "id": id,
            "name": format!("t1_{id}"),
            "author": "ferris",
            "body": format!("Comment {id}"),
            "created_utc": 1700000100.0,
            "replies": ""
        }
    })
}

pub fn listing(children: Vec<Value>, after: Option<&str>) -> Value {
    json!({
        "kind": "Listing",
        "data": {
            "children": children,
            "after": after,
            "before": null
        }
    })
}
