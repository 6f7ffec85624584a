use crate::client::{RedditApi, RedditClientError};
use crate::models::SubredditSummary;
use crate::operations::{normalize_subreddit_name, ToolOutcome};
use log::info;
use std::sync::Arc;

/// Configuration options for looking up a subreddit
#[derive(Debug, Clone)]
pub struct SubredditInfoOptions {
    /// Subreddit name, with or without the `r/` prefix
    pub subreddit: String,
}

/// Operation for fetching one subreddit's metadata
pub struct SubredditInfoOperation {
    options: SubredditInfoOptions,
    client: Arc<dyn RedditApi>,
}

impl SubredditInfoOperation {
    pub fn with_client(options: SubredditInfoOptions, client: Arc<dyn RedditApi>) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<SubredditSummary, RedditClientError> {
        let name = normalize_subreddit_name(&self.options.subreddit)?;
        info!("Fetching subreddit info for r/{}", name);

        let data = self.client.fetch_subreddit(&name).await?;
        Ok(SubredditSummary::from(data))
    }
}

/// Run the lookup and wrap the result for the caller
pub async fn subreddit_info(
    client: Arc<dyn RedditApi>,
    subreddit: String,
) -> ToolOutcome<SubredditSummary> {
    let operation = SubredditInfoOperation::with_client(SubredditInfoOptions { subreddit }, client);
    ToolOutcome::from_result("get_subreddit_list_info", operation.execute().await)
}

/// CLI handler function for the subreddit command
pub async fn handle_subreddit_command_with_client(
    subreddit: String,
    client: Arc<dyn RedditApi>,
) -> bool {
    let outcome = subreddit_info(client, subreddit).await;
    println!("{}", outcome.to_json());
    outcome.is_ok()
}
