use clap::Parser;
use env_logger::{Env, Target};
use log::{error, info, warn};
use reddit_mcp::cli::{Cli, Commands};
use reddit_mcp::client::RedditApi;
use reddit_mcp::config::AppConfig;
use reddit_mcp::operations::{comments, subreddit_info, subreddit_search, threads};
use reddit_mcp::prompts;
use reddit_mcp::server;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries MCP frames, so logs always go to stderr
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if let Some(user_agent) = cli.user_agent {
        config.user_agent = user_agent;
    }

    let client = match config.create_client() {
        Ok(client) => Arc::new(client),
        Err(err) => {
            error!("Failed to create Reddit client: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let api: Arc<dyn RedditApi> = client.clone();

    let succeeded = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => match server::serve_stdio(api).await {
            Ok(()) => true,
            Err(err) => {
                error!("MCP server error: {}", err);
                false
            }
        },
        Commands::Subreddit { name } => {
            subreddit_info::handle_subreddit_command_with_client(name, api).await
        }
        Commands::Search { topic, limit } => {
            subreddit_search::handle_search_command_with_client(topic, limit, api).await
        }
        Commands::Threads {
            subreddit,
            limit,
            sort,
        } => threads::handle_threads_command_with_client(subreddit, limit, sort, api).await,
        Commands::Comments { post_ids, limit } => {
            comments::handle_comments_command_with_client(post_ids, limit, api).await
        }
        Commands::PostComments { post_id, limit } => {
            comments::handle_post_comments_command_with_client(post_id, limit, api).await
        }
        Commands::Prompt {
            topic,
            limit,
            subreddits,
        } => {
            println!(
                "{}",
                prompts::reddit_post_summary_prompt(&topic, limit, subreddits)
            );
            true
        }
    };

    if let Err(err) = client.close().await {
        warn!("Failed to close Reddit client cleanly: {}", err);
    }
    info!("Shut down");

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
