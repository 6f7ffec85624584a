//! MCP server exposing the Reddit tools and the research prompt over stdio

use crate::client::RedditApi;
use crate::operations::comments::{self, DEFAULT_COMMENTS_LIMIT};
use crate::operations::subreddit_search::{self, DEFAULT_SEARCH_LIMIT};
use crate::operations::threads::{self, DEFAULT_THREADS_LIMIT};
use crate::operations::{subreddit_info, ToolOutcome};
use crate::prompts::{self, DEFAULT_PROMPT_LIMIT, DEFAULT_SUBREDDIT_COUNT};
use log::info;
use rmcp::handler::server::router::prompt::PromptRouter;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, GetPromptRequestParam, GetPromptResult, Implementation,
    ListPromptsResult, PaginatedRequestParam, PromptMessage, PromptMessageRole, ProtocolVersion,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{
    prompt, prompt_handler, prompt_router, tool, tool_handler, tool_router, ErrorData as McpError,
    RoleServer, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SubredditInfoRequest {
    /// The name of the subreddit to retrieve information about, e.g. "rust" or "r/rust"
    pub subreddit_topic: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RelevantSubredditsRequest {
    /// Keyword or phrase to search subreddits for
    pub topic: String,
    /// The maximum number of subreddits to return (default 10, max 100)
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RelevantThreadsRequest {
    /// The name of the subreddit to retrieve threads from
    pub subreddit_name: String,
    /// The maximum number of posts per category (default 5, max 100)
    pub limit: Option<u32>,
    /// One of "hot", "new", "top" or "controversial". Omit to fetch all four categories.
    pub sort_by: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PostsCommentsRequest {
    /// Ids of the posts to retrieve comments from, with or without the "t3_" prefix
    pub post_ids: Vec<String>,
    /// The maximum number of top-level comments per post (default 10, max 100)
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CommentsFromPostRequest {
    /// Id of the post to retrieve comments from, with or without the "t3_" prefix
    pub post_id: String,
    /// The maximum number of top-level comments (default 10, max 100)
    pub limit: Option<u32>,
}

/// Prompt arguments arrive as strings, so the counts are parsed by hand
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PostSummaryPromptArgs {
    /// Topic to research on Reddit
    pub topic: String,
    /// Number of posts to keep and comments to fetch per post (default 10)
    pub limit: Option<String>,
    /// Number of subreddits to research (default 3)
    pub subreddit_count: Option<String>,
}

/// Tool server backed by one shared Reddit client
#[derive(Clone)]
pub struct RedditMcpServer {
    client: Arc<dyn RedditApi>,
    tool_router: ToolRouter<RedditMcpServer>,
    prompt_router: PromptRouter<RedditMcpServer>,
}

#[tool_router]
impl RedditMcpServer {
    pub fn new(client: Arc<dyn RedditApi>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    #[tool(
        description = "Retrieve information about a subreddit: name, public description, subscriber count and active users."
    )]
    async fn get_subreddit_list_info(
        &self,
        Parameters(req): Parameters<SubredditInfoRequest>,
    ) -> Result<CallToolResult, McpError> {
        let outcome =
            subreddit_info::subreddit_info(self.client.clone(), req.subreddit_topic).await;
        Ok(into_call_result(outcome))
    }

    #[tool(description = "Search for subreddits related to a topic keyword.")]
    async fn get_relevant_subreddits(
        &self,
        Parameters(req): Parameters<RelevantSubredditsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let limit = req.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        let outcome =
            subreddit_search::relevant_subreddits(self.client.clone(), req.topic, limit).await;
        Ok(into_call_result(outcome))
    }

    #[tool(
        description = "Retrieve posts from a subreddit. Without sort_by, returns an object with the categories 'hot', 'new', 'top' and 'controversial', each a list of up to `limit` posts. With sort_by, returns a single list. Each post has its id, author, title, body, comment count, score, URL, creation time and subreddit."
    )]
    async fn get_relevant_threads(
        &self,
        Parameters(req): Parameters<RelevantThreadsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let limit = req.limit.unwrap_or(DEFAULT_THREADS_LIMIT);
        let outcome =
            threads::relevant_threads(self.client.clone(), req.subreddit_name, limit, req.sort_by)
                .await;
        Ok(into_call_result(outcome))
    }

    #[tool(
        description = "Retrieve the top-scored top-level comments of several posts, expanding collapsed comments as needed. Returns an object keyed by post id; each comment has its id, author, score and body."
    )]
    async fn get_posts_comments(
        &self,
        Parameters(req): Parameters<PostsCommentsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let limit = req.limit.unwrap_or(DEFAULT_COMMENTS_LIMIT);
        let outcome = comments::posts_comments(self.client.clone(), req.post_ids, limit).await;
        Ok(into_call_result(outcome))
    }

    #[tool(
        description = "Retrieve the top-scored top-level comments of one post: id, author, score and body of each."
    )]
    async fn get_comments_from_post(
        &self,
        Parameters(req): Parameters<CommentsFromPostRequest>,
    ) -> Result<CallToolResult, McpError> {
        let limit = req.limit.unwrap_or(DEFAULT_COMMENTS_LIMIT);
        let outcome = comments::comments_from_post(self.client.clone(), req.post_id, limit).await;
        Ok(into_call_result(outcome))
    }
}

#[prompt_router]
impl RedditMcpServer {
    #[prompt(
        name = "get_reddit_post_summary",
        description = "Research and summarize Reddit discussions about a topic using the Reddit tools."
    )]
    async fn get_reddit_post_summary(
        &self,
        Parameters(args): Parameters<PostSummaryPromptArgs>,
    ) -> Result<GetPromptResult, McpError> {
        let limit = parse_prompt_count("limit", args.limit.as_deref(), DEFAULT_PROMPT_LIMIT)?;
        let subreddit_count = parse_prompt_count(
            "subreddit_count",
            args.subreddit_count.as_deref(),
            DEFAULT_SUBREDDIT_COUNT,
        )?;

        let text = prompts::reddit_post_summary_prompt(&args.topic, limit, subreddit_count);
        Ok(GetPromptResult {
            description: Some(format!("Reddit discussion summary for '{}'", args.topic)),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
        })
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for RedditMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Reddit research tools. Find subreddits with get_relevant_subreddits, list posts with get_relevant_threads, then read discussions with get_posts_comments. Every tool returns JSON with status 'ok' and data, or status 'error' and an error kind and message."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

/// Wrap an outcome as tool content, flagging errors to the caller
pub fn into_call_result<T: Serialize>(outcome: ToolOutcome<T>) -> CallToolResult {
    let content = vec![Content::text(outcome.to_json())];
    if outcome.is_ok() {
        CallToolResult::success(content)
    } else {
        CallToolResult::error(content)
    }
}

fn parse_prompt_count(name: &str, value: Option<&str>, default: u32) -> Result<u32, McpError> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => match raw.parse::<u32>() {
            Ok(count) if count > 0 => Ok(count),
            _ => Err(McpError::invalid_params(
                format!("{} must be a positive integer, got '{}'", name, raw),
                None,
            )),
        },
    }
}

/// Serve MCP over stdin/stdout until the peer disconnects
pub async fn serve_stdio(client: Arc<dyn RedditApi>) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Reddit MCP server on stdio");

    let service = RedditMcpServer::new(client)
        .serve(rmcp::transport::stdio())
        .await?;
    let reason = service.waiting().await?;

    info!("MCP session ended: {:?}", reason);
    Ok(())
}
