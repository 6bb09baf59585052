//! Operations module drives the paginators and formats results for the CLI

pub mod comments;
pub mod posts;
pub mod user;
