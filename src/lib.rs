pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod operations;
pub mod prompts;
pub mod server;

pub use client::{RedditApi, RedditClient, RedditClientError};
pub use config::AppConfig;
