use crate::client::{RedditClient, Result};
use crate::models::RedditObject;
use crate::paginators::{Paginator, Sorting, UserSection};
use log::{error, info};

/// Operation for walking one of a user's listings
pub struct UserOperation {
    username: String,
    section: UserSection,
    sorting: Option<Sorting>,
    pages: usize,
    client: RedditClient,
}

impl UserOperation {
    pub fn with_client(
        username: impl Into<String>,
        section: UserSection,
        sorting: Option<Sorting>,
        pages: usize,
        client: RedditClient,
    ) -> Self {
        Self {
            username: username.into(),
            section,
            sorting,
            pages,
            client,
        }
    }

    /// Fetch the listing and render one line per item.
    pub async fn execute(&self) -> Result<String> {
        let mut paginator: Paginator<RedditObject, RedditClient> =
            Paginator::user(&self.client, self.username.as_str(), self.section);
        paginator.set_sorting(self.sorting);

        info!(
            "Fetching {} of u/{}",
            self.section.as_str(),
            self.username
        );
        let items = paginator.accumulate_merged(self.pages).await?;

        let mut output = String::new();
        for item in &items {
            output.push_str(&format_item(item));
            output.push('\n');
        }
        if items.is_empty() {
            output.push_str("Nothing found.\n");
        }
        Ok(output)
    }
}

pub(crate) fn format_item(item: &RedditObject) -> String {
    match item {
        RedditObject::Submission(post) => format!("[post] {}", post.format_short_summary()),
        RedditObject::Comment(comment) => {
            let body: String = comment.body.chars().take(80).collect();
            format!(
                "[comment] r/{} | {} pts | {}",
                comment.subreddit.as_deref().unwrap_or("?"),
                comment.score,
                body.replace('\n', " ")
            )
        }
        other => format!("[{}] {}", other.kind(), other.fullname().unwrap_or_default()),
    }
}

pub async fn handle_user_command_with_client(
    username: String,
    section: UserSection,
    sorting: Option<Sorting>,
    pages: usize,
    client: RedditClient,
) -> Result<()> {
    let operation = UserOperation::with_client(username, section, sorting, pages, client);
    match operation.execute().await {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(err) => {
            error!("Error fetching user listing: {}", err);
            Err(err)
        }
    }
}
