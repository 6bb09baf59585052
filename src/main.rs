use clap::Parser;
use log::error;
use redrust::cli::{Cli, Commands};
use redrust::config::AppConfig;
use redrust::operations::comments::handle_comments_command_with_client;
use redrust::operations::posts::{handle_posts_command_with_client, PostsOptions};
use redrust::operations::user::handle_user_command_with_client;
use redrust::paginators::ListingTarget;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let client = match config.create_client() {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to create Reddit client: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Posts {
            subreddit,
            sort,
            time,
            limit,
            pages,
            brief,
        } => {
            let target = match subreddit {
                Some(name) => ListingTarget::Subreddit(name),
                None => ListingTarget::FrontPage,
            };
            let options = PostsOptions {
                target,
                sorting: sort,
                time_period: time,
                limit: limit.unwrap_or(config.page_limit),
                pages,
                brief,
            };
            handle_posts_command_with_client(options, client).await
        }
        Commands::Multi {
            path,
            sort,
            pages,
            brief,
        } => {
            let options = PostsOptions {
                target: ListingTarget::MultiReddit { path },
                sorting: sort,
                time_period: None,
                limit: config.page_limit,
                pages,
                brief,
            };
            handle_posts_command_with_client(options, client).await
        }
        Commands::User {
            username,
            section,
            sort,
            pages,
        } => handle_user_command_with_client(username, section, sort, pages, client).await,
        Commands::Comments { id } => handle_comments_command_with_client(id, client).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
