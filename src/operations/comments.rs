use crate::client::{RedditClient, Result};
use crate::models::{Comment, Listing, Submission};
use log::{error, info};

/// Result of fetching a submission with its comment tree
#[derive(Debug)]
pub struct CommentsResult {
    /// Total comments in the tree, nested replies included
    pub comment_count: usize,
    pub formatted_output: String,
    pub submission: Submission,
}

/// Operation for reading a post and its comments
pub struct CommentsOperation {
    submission_id: String,
    client: RedditClient,
}

impl CommentsOperation {
    pub fn with_client(submission_id: impl Into<String>, client: RedditClient) -> Self {
        Self {
            submission_id: submission_id.into(),
            client,
        }
    }

    pub async fn execute(&self) -> Result<CommentsResult> {
        info!("Fetching submission {} with comments", self.submission_id);
        let submission = self.client.get_submission(&self.submission_id).await?;

        let mut output = String::new();
        output.push_str(&submission.format_summary());
        output.push_str("\n\n");
        format_comment_tree(submission.comments(), 0, &mut output);

        let not_loaded = submission.comments.as_ref().map_or(0, Listing::more_count);
        if not_loaded > 0 {
            output.push_str(&format!("... {} more comment(s) not loaded\n", not_loaded));
        }

        Ok(CommentsResult {
            comment_count: submission.comments().iter().map(Comment::tree_size).sum(),
            formatted_output: output,
            submission,
        })
    }
}

pub(crate) fn format_comment_tree(comments: &[Comment], depth: usize, output: &mut String) {
    let indent = "  ".repeat(depth);
    for comment in comments {
        output.push_str(&format!(
            "{}u/{} ({} pts): {}\n",
            indent,
            comment.author,
            comment.score,
            comment.body.replace('\n', " ")
        ));
        format_comment_tree(comment.replies(), depth + 1, output);
    }
}

/// CLI handler for the comments command
pub async fn handle_comments_command_with_client(
    submission_id: String,
    client: RedditClient,
) -> Result<()> {
    let operation = CommentsOperation::with_client(submission_id, client);
    match operation.execute().await {
        Ok(result) => {
            print!("{}", result.formatted_output);
            info!("{} comment(s) shown", result.comment_count);
            Ok(())
        }
        Err(err) => {
            error!("Error fetching comments: {}", err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Thing;
    use serde_json::{json, Value};

    fn comment(id: &str, body: &str, replies: Value) -> Value {
        json!({"kind": "t1", "data": {
            "id": id, "name": format!("t1_{id}"), "author": "ferris",
            "body": body, "score": 3, "created_utc": 1.0, "replies": replies
        }})
    }

    #[test]
    fn indents_nested_replies() {
        let reply = comment("c2", "reply", json!(""));
        let top = comment(
            "c1",
            "top\nlevel",
            json!({"kind": "Listing", "data": {"children": [reply], "after": null}}),
        );
        let parsed = Comment::from_data(&top["data"]).unwrap();

        let mut output = String::new();
        format_comment_tree(&[parsed], 0, &mut output);
        assert_eq!(
            output,
            "u/ferris (3 pts): top level\n  u/ferris (3 pts): reply\n"
        );
    }
}
