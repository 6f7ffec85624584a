use crate::client::{RedditApi, RedditClientError};
use crate::models::{CategorizedThreads, PostSummary, SortOrder, ThreadListing};
use crate::operations::{normalize_subreddit_name, validate_limit, ToolOutcome};
use log::{debug, info};
use std::sync::Arc;

pub const DEFAULT_THREADS_LIMIT: u32 = 5;

/// Configuration options for listing threads
#[derive(Debug, Clone)]
pub struct ThreadsOptions {
    /// The name of the subreddit to fetch posts from
    pub subreddit: String,
    /// The maximum number of posts per category
    pub limit: u32,
    /// Single sort order; all four categories are fetched when absent
    pub sort_by: Option<String>,
}

/// Operation for fetching posts from a subreddit
pub struct ThreadsOperation {
    options: ThreadsOptions,
    client: Arc<dyn RedditApi>,
}

impl ThreadsOperation {
    pub fn with_client(options: ThreadsOptions, client: Arc<dyn RedditApi>) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<ThreadListing, RedditClientError> {
        // Reject a bad sort key before touching the network
        let sort = self
            .options
            .sort_by
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?;
        let subreddit = normalize_subreddit_name(&self.options.subreddit)?;
        let limit = validate_limit(self.options.limit)?;

        match sort {
            Some(sort) => {
                info!("Fetching {} {} posts from r/{}", limit, sort, subreddit);
                let posts = self.fetch(&subreddit, sort, limit).await?;
                Ok(ThreadListing::Sorted(posts))
            }
            None => {
                info!(
                    "Fetching {} posts per category from r/{}",
                    limit, subreddit
                );
                let mut threads = CategorizedThreads::default();
                for sort in SortOrder::ALL {
                    *threads.category_mut(sort) = self.fetch(&subreddit, sort, limit).await?;
                }
                Ok(ThreadListing::Categorized(threads))
            }
        }
    }

    async fn fetch(
        &self,
        subreddit: &str,
        sort: SortOrder,
        limit: u32,
    ) -> Result<Vec<PostSummary>, RedditClientError> {
        let posts = self.client.fetch_posts(subreddit, sort, limit).await?;
        debug!("r/{} {}: {} posts", subreddit, sort, posts.len());

        Ok(posts
            .into_iter()
            .take(limit as usize)
            .map(PostSummary::from)
            .collect())
    }
}

/// Run the listing and wrap the result for the caller
pub async fn relevant_threads(
    client: Arc<dyn RedditApi>,
    subreddit: String,
    limit: u32,
    sort_by: Option<String>,
) -> ToolOutcome<ThreadListing> {
    let options = ThreadsOptions {
        subreddit,
        limit,
        sort_by,
    };
    let operation = ThreadsOperation::with_client(options, client);
    ToolOutcome::from_result("get_relevant_threads", operation.execute().await)
}

/// CLI handler function for the threads command
pub async fn handle_threads_command_with_client(
    subreddit: String,
    limit: u32,
    sort_by: Option<String>,
    client: Arc<dyn RedditApi>,
) -> bool {
    let outcome = relevant_threads(client, subreddit, limit, sort_by).await;
    println!("{}", outcome.to_json());
    outcome.is_ok()
}
