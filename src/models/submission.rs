use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::comment::Comment;
use super::fields::{self, FieldKind, FieldSpec};
use super::listing::Listing;
use super::Thing;
use crate::client::error::{RedditClientError, Result};

/// A post (`t3`).
///
/// When fetched through `/comments/{id}` the submission also owns the listing
/// of its top-level comments; inside ordinary listings `comments` is `None`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Submission {
    // Basic post information
    pub id: String,
    pub name: String,
    pub title: String,
    pub author: String,
    pub subreddit: String,
    pub permalink: String,
    pub url: Option<String>,
    pub domain: Option<String>,
    pub created_utc: f64,

    // Post type and content
    pub is_self: bool,
    pub selftext: String,
    pub selftext_html: Option<String>,
    pub is_video: bool,
    pub thumbnail: Option<String>,

    // Post metrics
    pub score: i64,
    pub upvote_ratio: f64,
    pub num_comments: i64,

    // Post status and moderation
    pub over_18: bool,
    pub spoiler: bool,
    pub stickied: bool,
    pub locked: bool,
    pub edited: Value, // Can be boolean or timestamp
    pub link_flair_text: Option<String>,

    #[serde(skip)]
    pub comments: Option<Listing<Comment>>,
}

impl Submission {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::String),
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::required("author", FieldKind::String),
        FieldSpec::required("subreddit", FieldKind::String),
        FieldSpec::required("permalink", FieldKind::String),
        FieldSpec::optional("url", FieldKind::String),
        FieldSpec::optional("domain", FieldKind::String),
        FieldSpec::required("created_utc", FieldKind::Timestamp),
        FieldSpec::optional("is_self", FieldKind::Boolean),
        FieldSpec::optional("selftext", FieldKind::String),
        FieldSpec::optional("selftext_html", FieldKind::String),
        FieldSpec::optional("is_video", FieldKind::Boolean),
        FieldSpec::optional("thumbnail", FieldKind::String),
        FieldSpec::optional("score", FieldKind::Integer),
        FieldSpec::optional("upvote_ratio", FieldKind::Float),
        FieldSpec::optional("num_comments", FieldKind::Integer),
        FieldSpec::optional("over_18", FieldKind::Boolean),
        FieldSpec::optional("spoiler", FieldKind::Boolean),
        FieldSpec::optional("stickied", FieldKind::Boolean),
        FieldSpec::optional("locked", FieldKind::Boolean),
        FieldSpec::optional("edited", FieldKind::Any),
        FieldSpec::optional("link_flair_text", FieldKind::String),
    ];

    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_utc as i64, 0)
    }

    /// Top-level comments, empty unless fetched with the submission.
    pub fn comments(&self) -> &[Comment] {
        self.comments
            .as_ref()
            .map(|listing| listing.children.as_slice())
            .unwrap_or_default()
    }

    /// Format a post for display with important metadata
    pub fn format_summary(&self) -> String {
        let mut content = format!(
            "Title: {}\nAuthor: u/{}\nSubreddit: r/{}\nScore: {} ({}% upvoted) | Comments: {}\n",
            self.title,
            self.author,
            self.subreddit,
            self.score,
            (self.upvote_ratio * 100.0) as i32,
            self.num_comments,
        );

        let mut flags = Vec::new();
        if self.is_self {
            flags.push("Self Post");
        }
        if self.over_18 {
            flags.push("NSFW");
        }
        if self.spoiler {
            flags.push("Spoiler");
        }
        if self.is_video {
            flags.push("Video");
        }
        if self.stickied {
            flags.push("Stickied");
        }
        if self.locked {
            flags.push("Locked");
        }
        if !flags.is_empty() {
            content.push_str(&format!("Flags: [{}]\n", flags.join(", ")));
        }

        if let Some(flair) = self.link_flair_text.as_deref().filter(|f| !f.is_empty()) {
            content.push_str(&format!("Flair: {}\n", flair));
        }

        // For text posts, include the text (truncated if long)
        if self.is_self && !self.selftext.is_empty() {
            let text = if self.selftext.chars().count() > 500 {
                format!("{}...", self.selftext.chars().take(500).collect::<String>())
            } else {
                self.selftext.clone()
            };
            content.push_str("\nContent:\n---------\n");
            content.push_str(&text);
            content.push_str("\n---------\n");
        }

        let permalink = format!("https://reddit.com{}", self.permalink);
        content.push_str(&format!("\nPermalink: {}", permalink));
        if let Some(url) = self.url.as_deref().filter(|u| !self.is_self && *u != permalink) {
            content.push_str(&format!("\nExternal URL: {}", url));
        }

        content
    }

    /// Get a short summary for the post (title, author, score)
    pub fn format_short_summary(&self) -> String {
        format!(
            "[r/{} | {} pts] {} - by u/{}",
            self.subreddit, self.score, self.title, self.author
        )
    }

    /// Format timestamp as a human-readable string
    pub fn format_timestamp(&self) -> String {
        let timestamp = Utc
            .timestamp_opt(self.created_utc as i64, 0)
            .single()
            .unwrap_or_else(Utc::now);

        timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

impl Thing for Submission {
    const KIND: &'static str = "t3";

    fn from_data(data: &Value) -> Result<Self> {
        fields::decode(data, Self::FIELDS, "Submission")
    }

    /// `/comments/{id}` answers with `[post listing, comment listing]`; a bare
    /// `{kind: "t3", data}` thing is accepted too and carries no comments.
    fn from_tree(tree: &Value) -> Result<Self> {
        if tree.get("kind").and_then(Value::as_str) == Some(Self::KIND) {
            let data = tree.get("data").ok_or_else(|| {
                RedditClientError::MalformedSubmission("thing has no data".to_string())
            })?;
            return Self::from_data(data);
        }

        let parts = match tree.as_array() {
            Some(parts) if parts.len() == 2 => parts,
            Some(parts) => {
                return Err(RedditClientError::MalformedSubmission(format!(
                    "expected 2 listings, found {}",
                    parts.len()
                )))
            }
            None => {
                return Err(RedditClientError::MalformedSubmission(
                    "expected an array of 2 listings".to_string(),
                ))
            }
        };

        let post = parts[0]
            .get("data")
            .and_then(|d| d.get("children"))
            .and_then(Value::as_array)
            .and_then(|children| children.first())
            .and_then(|child| child.get("data"))
            .ok_or_else(|| {
                RedditClientError::MalformedSubmission(
                    "first listing has no post at children[0].data".to_string(),
                )
            })?;

        let comment_data = parts[1]
            .get("data")
            .filter(|data| data.get("children").is_some_and(Value::is_array))
            .ok_or_else(|| {
                RedditClientError::MalformedSubmission(
                    "second listing has no comment children".to_string(),
                )
            })?;

        let mut submission = Self::from_data(post)?;
        submission.comments = Some(Listing::from_json(comment_data)?);
        Ok(submission)
    }
}
