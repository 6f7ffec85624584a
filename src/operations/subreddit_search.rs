use crate::client::{RedditApi, RedditClientError};
use crate::models::SubredditSummary;
use crate::operations::{validate_limit, ToolOutcome};
use log::info;
use std::sync::Arc;

pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Configuration options for searching subreddits by topic
#[derive(Debug, Clone)]
pub struct SubredditSearchOptions {
    /// Keyword or phrase to search for
    pub topic: String,
    /// The maximum number of subreddits to return
    pub limit: u32,
}

/// Operation for finding subreddits related to a topic
pub struct SubredditSearchOperation {
    options: SubredditSearchOptions,
    client: Arc<dyn RedditApi>,
}

impl SubredditSearchOperation {
    pub fn with_client(options: SubredditSearchOptions, client: Arc<dyn RedditApi>) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<Vec<SubredditSummary>, RedditClientError> {
        let topic = self.options.topic.trim();
        if topic.is_empty() {
            return Err(RedditClientError::InvalidArgument(
                "Search topic must not be empty".to_string(),
            ));
        }
        let limit = validate_limit(self.options.limit)?;
        info!("Searching up to {} subreddits about '{}'", limit, topic);

        let results = self.client.search_subreddits(topic, limit).await?;
        Ok(results
            .into_iter()
            .take(limit as usize)
            .map(SubredditSummary::from)
            .collect())
    }
}

/// Run the search and wrap the result for the caller
pub async fn relevant_subreddits(
    client: Arc<dyn RedditApi>,
    topic: String,
    limit: u32,
) -> ToolOutcome<Vec<SubredditSummary>> {
    let operation =
        SubredditSearchOperation::with_client(SubredditSearchOptions { topic, limit }, client);
    ToolOutcome::from_result("get_relevant_subreddits", operation.execute().await)
}

/// CLI handler function for the search command
pub async fn handle_search_command_with_client(
    topic: String,
    limit: u32,
    client: Arc<dyn RedditApi>,
) -> bool {
    let outcome = relevant_subreddits(client, topic, limit).await;
    println!("{}", outcome.to_json());
    outcome.is_ok()
}
