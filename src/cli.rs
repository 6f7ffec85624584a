use clap::Parser;

use crate::operations::comments::DEFAULT_COMMENTS_LIMIT;
use crate::operations::subreddit_search::DEFAULT_SEARCH_LIMIT;
use crate::operations::threads::DEFAULT_THREADS_LIMIT;
use crate::prompts::{DEFAULT_PROMPT_LIMIT, DEFAULT_SUBREDDIT_COUNT};

#[derive(Parser, Debug)]
#[command(
    name = "reddit-mcp",
    version,
    about = "MCP tool server for fetching subreddits, posts and comments from Reddit."
)]
pub struct Cli {
    /// Override the User-Agent sent to Reddit (defaults to REDDIT_USER_AGENT).
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Serve the tools over MCP on stdin/stdout (the default).
    Serve,

    /// Show information about one subreddit.
    Subreddit {
        /// The name of the subreddit, e.g. "rust" or "r/rust".
        #[arg(help = "Subreddit name", required = true)]
        name: String,
    },

    /// Search for subreddits about a topic.
    Search {
        /// Keyword or phrase to search for.
        #[arg(help = "Search topic", required = true)]
        topic: String,

        /// The maximum number of subreddits to return.
        #[arg(long, short, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: u32,
    },

    /// List posts from a subreddit, per category or under one sort order.
    Threads {
        /// The name of the subreddit to fetch posts from.
        #[arg(help = "Subreddit name", required = true)]
        subreddit: String,

        /// The maximum number of posts per category.
        #[arg(long, short, default_value_t = DEFAULT_THREADS_LIMIT)]
        limit: u32,

        /// hot, new, top or controversial. All four when omitted.
        #[arg(long, short)]
        sort: Option<String>,
    },

    /// Fetch top comments for several posts, expanding collapsed comments.
    Comments {
        /// Post ids, with or without the t3_ prefix.
        #[arg(help = "Post ids", required = true, num_args = 1..)]
        post_ids: Vec<String>,

        /// The maximum number of top-level comments per post.
        #[arg(long, short, default_value_t = DEFAULT_COMMENTS_LIMIT)]
        limit: u32,
    },

    /// Fetch top-level comments for one post.
    PostComments {
        /// Post id, with or without the t3_ prefix.
        #[arg(help = "Post id", required = true)]
        post_id: String,

        /// The maximum number of top-level comments.
        #[arg(long, short, default_value_t = DEFAULT_COMMENTS_LIMIT)]
        limit: u32,
    },

    /// Print the research prompt for a topic.
    Prompt {
        /// Topic to research.
        #[arg(help = "Topic", required = true)]
        topic: String,

        /// Posts to keep and comments to fetch per post.
        #[arg(long, short, default_value_t = DEFAULT_PROMPT_LIMIT)]
        limit: u32,

        /// Number of subreddits to research.
        #[arg(long, default_value_t = DEFAULT_SUBREDDIT_COUNT)]
        subreddits: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["reddit-mcp"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn threads_command_parses_sort_and_limit() {
        let cli = Cli::try_parse_from([
            "reddit-mcp",
            "threads",
            "r/rust",
            "--limit",
            "3",
            "--sort",
            "top",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Threads {
                subreddit,
                limit,
                sort,
            }) => {
                assert_eq!(subreddit, "r/rust");
                assert_eq!(limit, 3);
                assert_eq!(sort.as_deref(), Some("top"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn comments_command_takes_many_ids() {
        let cli = Cli::try_parse_from(["reddit-mcp", "comments", "a1", "t3_b2"]).unwrap();
        match cli.command {
            Some(Commands::Comments { post_ids, limit }) => {
                assert_eq!(post_ids, vec!["a1", "t3_b2"]);
                assert_eq!(limit, DEFAULT_COMMENTS_LIMIT);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn user_agent_is_global() {
        let cli = Cli::try_parse_from(["reddit-mcp", "subreddit", "rust", "--user-agent", "ua/1"])
            .unwrap();
        assert_eq!(cli.user_agent.as_deref(), Some("ua/1"));
    }
}
