mod common;

use common::{comment, listing, post};
use redrust::client::{RedditClientError, RestResponse};
use redrust::models::{parse_any, Comment, RedditObject, Submission, Thing};
use serde_json::{json, Value};

fn envelope(body: &Value) -> RestResponse {
    RestResponse::from_parts(200, Vec::new(), body.to_string().as_bytes()).unwrap()
}

#[test]
fn submission_with_comments_from_response() {
    let body = json!([
        listing(vec![post("92dd8")], None),
        listing(vec![comment("c1"), comment("c2")], None),
    ]);
    let response = envelope(&body);
    let submission: Submission = response.as_thing().unwrap();

    let mut post_only = submission.clone();
    post_only.comments = None;
    assert_eq!(post_only, Submission::from_data(&post("92dd8")["data"]).unwrap());
    let bodies: Vec<&str> = submission.comments().iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, vec!["Comment c1", "Comment c2"]);

    // The untyped entry point recognises the same shape
    assert!(matches!(parse_any(response.json()), Ok(RedditObject::Submission(_))));
}

#[test]
fn listing_from_response_keeps_length_and_order() {
    let children: Vec<Value> = (0..7).map(|i| comment(&format!("c{i}"))).collect();
    let response = envelope(&listing(children, Some("t1_c6")));
    let page = response.as_listing::<Comment>().unwrap();

    assert_eq!(page.len(), 7);
    for (i, c) in page.iter().enumerate() {
        assert_eq!(c.id, format!("c{i}"));
    }
    assert_eq!(page.after.as_deref(), Some("t1_c6"));
}

#[test]
fn single_thing_round_trips_through_serde() {
    let response = envelope(&post("abc"));
    let submission: Submission = response.as_thing().unwrap();
    let reserialized = serde_json::to_value(&submission).unwrap();

    for key in ["id", "name", "title", "author", "subreddit", "permalink", "url"] {
        assert_eq!(reserialized[key], response.json()["data"][key], "{key}");
    }
    assert_eq!(Submission::from_data(&reserialized).unwrap(), submission);
}

#[test]
fn single_thing_where_listing_expected() {
    let response = envelope(&json!({"kind": "t3", "data": {"id": "x"}}));
    let err = response.as_listing::<Submission>().unwrap_err();
    assert!(matches!(
        err,
        RedditClientError::MissingField { field: "children", .. }
    ));
}

#[test]
fn submission_required_fields_are_enforced() {
    let mut body = post("abc");
    body["data"].as_object_mut().unwrap().remove("title");
    let err = envelope(&body).as_thing::<Submission>().unwrap_err();
    assert!(matches!(
        err,
        RedditClientError::MissingField {
            field: "title",
            variant: "Submission"
        }
    ));
}
