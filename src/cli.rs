use crate::paginators::{Sorting, TimePeriod, UserSection};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "redrust",
    author = "Robert Butler",
    version = "1.0",
    about = "Rust wrapper for the Reddit API."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Command to page through posts from a subreddit or the public frontpage.
    Posts {
        /// The name of the subreddit to fetch posts from.
        /// If not provided, posts from the public Reddit frontpage will be retrieved.
        #[arg(long, short, help = "Subreddit name (optional)", required = false)]
        subreddit: Option<String>,

        #[arg(long, value_enum, help = "Listing order")]
        sort: Option<Sorting>,

        /// Only used with `top` and `controversial`.
        #[arg(long, short, value_enum, help = "Time range")]
        time: Option<TimePeriod>,

        #[arg(long, short, help = "Posts per page (defaults to REDDIT_PAGE_LIMIT)")]
        limit: Option<u32>,

        #[arg(long, short, default_value_t = 1, help = "Number of pages to fetch")]
        pages: usize,

        /// Display posts in a brief, one-line format.
        #[arg(long, short, help = "Show posts in a brief one-line format")]
        brief: bool,
    },

    /// Page through the posts of a multireddit.
    Multi {
        /// Path of the multireddit, e.g. /user/reddit/m/fun
        #[arg(help = "Multireddit path", required = true)]
        path: String,

        #[arg(long, value_enum, help = "Listing order")]
        sort: Option<Sorting>,

        #[arg(long, short, default_value_t = 1, help = "Number of pages to fetch")]
        pages: usize,

        #[arg(long, short, help = "Show posts in a brief one-line format")]
        brief: bool,
    },

    /// Page through one of a user's listings.
    User {
        #[arg(help = "Reddit username", required = true)]
        username: String,

        #[arg(long, value_enum, default_value = "overview", help = "Which listing to read")]
        section: UserSection,

        #[arg(long, value_enum, help = "Listing order")]
        sort: Option<Sorting>,

        #[arg(long, short, default_value_t = 1, help = "Number of pages to fetch")]
        pages: usize,
    },

    /// Show a submission with its comment tree.
    Comments {
        /// Id of the submission, with or without the t3_ prefix.
        #[arg(help = "Submission id", required = true)]
        id: String,
    },
}
