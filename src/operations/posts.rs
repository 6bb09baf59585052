use crate::client::{RedditClient, Result};
use crate::models::Submission;
use crate::paginators::{ListingTarget, Paginator, Sorting, TimePeriod};
use chrono_tz::America::Los_Angeles;
use log::{error, info};

/// Configuration options for fetching posts
#[derive(Debug, Clone)]
pub struct PostsOptions {
    /// Where to read posts from
    pub target: ListingTarget,
    pub sorting: Option<Sorting>,
    pub time_period: Option<TimePeriod>,
    /// Posts per page
    pub limit: u32,
    /// How many pages to walk at most
    pub pages: usize,
    /// Display posts in a brief, one-line format
    pub brief: bool,
}

impl Default for PostsOptions {
    fn default() -> Self {
        Self {
            target: ListingTarget::FrontPage,
            sorting: None,
            time_period: None,
            limit: 10,
            pages: 1,
            brief: false,
        }
    }
}

/// Result of a posts fetch operation
#[derive(Debug)]
pub struct PostsResult {
    /// The number of posts found
    pub post_count: usize,
    /// Formatted output (for CLI display)
    pub formatted_output: String,
    pub posts: Vec<Submission>,
}

/// Operation for walking a listing of posts
pub struct PostsOperation {
    options: PostsOptions,
    client: RedditClient,
}

impl PostsOperation {
    /// Create a new posts operation with a custom Reddit client
    pub fn with_client(options: PostsOptions, client: RedditClient) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<PostsResult> {
        let mut paginator: Paginator<Submission, RedditClient> =
            Paginator::new(&self.client, self.options.target.clone()).with_limit(self.options.limit);
        paginator.set_sorting(self.options.sorting);
        paginator.set_time_period(self.options.time_period);

        info!(
            "Fetching up to {} page(s) from {}",
            self.options.pages,
            paginator.request_path()
        );

        let posts = paginator.accumulate_merged(self.options.pages).await?;

        let mut output = String::new();
        if posts.is_empty() {
            output.push_str("No posts found.\n");
        } else {
            output.push_str(&format!("Found {} posts\n", posts.len()));

            if self.options.brief {
                format_brief_output(&posts, &mut output);

                output.push_str("\nPost Type Legend:\n");
                output.push_str("[T] = Text post\n");
                output.push_str("[V] = Video\n");
                output.push_str("[I] = Image\n");
                output.push_str("[G] = Gallery\n");
                output.push_str("[L] = Link\n");
            } else {
                format_detailed_output(&posts, &mut output);
            }
        }

        Ok(PostsResult {
            post_count: posts.len(),
            formatted_output: output,
            posts,
        })
    }
}

fn local_time(post: &Submission, format: &str) -> String {
    post.created()
        .map(|utc| utc.with_timezone(&Los_Angeles).format(format).to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Single-character type indicator for a post
fn post_type(post: &Submission) -> &'static str {
    let url = post.url.as_deref().unwrap_or_default();
    if post.is_self {
        "T"
    } else if post.is_video {
        "V"
    } else if url.contains("i.redd.it") || url.contains("imgur.com") {
        "I"
    } else if url.contains("reddit.com/gallery") {
        "G"
    } else {
        "L"
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let mut chars = text.chars().take(max - 3).collect::<String>();
        chars.push_str("...");
        chars
    } else {
        text.to_string()
    }
}

pub(crate) fn format_brief_output(posts: &[Submission], output: &mut String) {
    for (i, post) in posts.iter().enumerate() {
        let content = if post.is_self {
            let text = post.selftext.trim().replace('\n', " ");
            if text.is_empty() {
                "[No content]".to_string()
            } else {
                format!("\"{}\"", truncate(&text, 30))
            }
        } else {
            let url = post.url.as_deref().unwrap_or_default();
            let url = url
                .strip_prefix("https://")
                .or_else(|| url.strip_prefix("http://"))
                .unwrap_or(url);
            truncate(url, 30)
        };

        output.push_str(&format!(
            "{:2}. [{}] [{}] {} ({}) r/{} | ID: {} | https://reddit.com{}\n",
            i + 1,
            post_type(post),
            local_time(post, "%H:%M"),
            truncate(&post.title, 30),
            content,
            post.subreddit,
            post.name,
            post.permalink
        ));
    }
}

pub(crate) fn format_detailed_output(posts: &[Submission], output: &mut String) {
    for post in posts {
        output.push_str("\n============ POST =============\n");
        output.push_str(&format!(
            "[{}] [Los Angeles time]\n",
            local_time(post, "%Y-%m-%d %H:%M:%S")
        ));
        output.push_str(&format!("Thing ID: {}\n", post.name));
        output.push_str(&post.format_summary());
        output.push_str("\n================================\n\n");
    }
}

/// CLI handler function for posts command that accepts a preconfigured client
pub async fn handle_posts_command_with_client(
    options: PostsOptions,
    client: RedditClient,
) -> Result<()> {
    let operation = PostsOperation::with_client(options, client);
    match operation.execute().await {
        Ok(result) => {
            print!("{}", result.formatted_output);
            Ok(())
        }
        Err(err) => {
            error!("Error fetching posts: {}", err);
            Err(err)
        }
    }
}
