//! A Reddit API client: typed object parsing, listing pagination and error
//! translation on top of `reqwest`.
//!
//! ```no_run
//! use redrust::client::RedditClient;
//! use redrust::paginators::{Paginator, Sorting};
//!
//! # async fn run() -> redrust::client::Result<()> {
//! let client = RedditClient::new()?;
//! let mut paginator = Paginator::subreddit(&client, "rust").with_sorting(Sorting::New);
//! while let Some(page) = paginator.next_page().await? {
//!     for post in page {
//!         println!("{}", post.format_short_summary());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod operations;
pub mod paginators;
