use crate::client::{RedditApi, RedditClientError, MORE_CHILDREN_BATCH};
use crate::models::{CommentSummary, CommentThing, PostComments};
use crate::operations::{normalize_post_id, validate_limit, ToolOutcome};
use log::{debug, info};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

pub const DEFAULT_COMMENTS_LIMIT: u32 = 10;

/// Upper bound on `/api/morechildren` round trips per post
const MAX_EXPANSION_ROUNDS: usize = 10;

/// Configuration options for fetching comments
#[derive(Debug, Clone)]
pub struct CommentsOptions {
    /// Posts to fetch comments for, with or without the `t3_` prefix
    pub post_ids: Vec<String>,
    /// The maximum number of top-level comments per post
    pub limit: u32,
    /// Expand "load more comments" placeholders until `limit` is reached
    pub expand_more: bool,
}

/// Operation for fetching the top-level comments of one or more posts
pub struct CommentsOperation {
    options: CommentsOptions,
    client: Arc<dyn RedditApi>,
}

impl CommentsOperation {
    pub fn with_client(options: CommentsOptions, client: Arc<dyn RedditApi>) -> Self {
        Self { options, client }
    }

    /// Comments for every requested post, keyed by the id as the caller wrote it.
    ///
    /// Ids naming the same post (`t3_abc` and `abc`) are fetched once, under the
    /// first spelling.
    pub async fn execute(&self) -> Result<PostComments, RedditClientError> {
        let limit = validate_limit(self.options.limit)?;
        let mut grouped = PostComments::new();
        let mut fetched = HashSet::new();

        for raw_id in &self.options.post_ids {
            let post_id = normalize_post_id(raw_id)?;
            if !fetched.insert(post_id.clone()) {
                debug!("Skipping duplicate post id {}", raw_id.trim());
                continue;
            }
            let comments = self.fetch_post(&post_id, limit).await?;
            grouped.insert(raw_id.trim().to_string(), comments);
        }

        Ok(grouped)
    }

    /// Comments for the first requested post only
    pub async fn execute_single(&self) -> Result<Vec<CommentSummary>, RedditClientError> {
        let limit = validate_limit(self.options.limit)?;
        let raw_id = self.options.post_ids.first().ok_or_else(|| {
            RedditClientError::InvalidArgument("A post id is required".to_string())
        })?;
        let post_id = normalize_post_id(raw_id)?;
        self.fetch_post(&post_id, limit).await
    }

    async fn fetch_post(
        &self,
        post_id: &str,
        limit: u32,
    ) -> Result<Vec<CommentSummary>, RedditClientError> {
        info!("Fetching up to {} top comments for post {}", limit, post_id);
        let link_id = format!("t3_{}", post_id);

        let tree = self.client.fetch_comment_tree(post_id, limit).await?;
        let limit = limit as usize;
        let mut comments = Vec::new();
        let mut pending = VecDeque::new();
        collect_top_level(tree, &link_id, &mut comments, &mut pending);

        if self.options.expand_more {
            let mut rounds = 0;
            while comments.len() < limit && !pending.is_empty() && rounds < MAX_EXPANSION_ROUNDS {
                let take = pending.len().min(MORE_CHILDREN_BATCH);
                let batch: Vec<String> = pending.drain(..take).collect();
                debug!("Expanding {} collapsed comments on {}", batch.len(), post_id);

                let things = self.client.fetch_more_comments(post_id, &batch).await?;
                collect_top_level(things, &link_id, &mut comments, &mut pending);
                rounds += 1;
            }
        }

        comments.truncate(limit);
        Ok(comments)
    }
}

/// Keep top-level comments and queue the ids behind top-level placeholders.
///
/// Entries without a parent id come from a `depth=1` tree and are top-level.
fn collect_top_level(
    things: Vec<CommentThing>,
    link_id: &str,
    comments: &mut Vec<CommentSummary>,
    pending: &mut VecDeque<String>,
) {
    for thing in things {
        match thing {
            CommentThing::Comment(data) => {
                if data.parent_id.as_deref().map_or(true, |p| p == link_id) {
                    comments.push(CommentSummary::from(data));
                }
            }
            CommentThing::More(more) => {
                if more.parent_id.as_deref().map_or(true, |p| p == link_id) {
                    // "_" marks a "continue this thread" link, which has nothing to expand
                    pending.extend(more.children.into_iter().filter(|id| id != "_"));
                }
            }
        }
    }
}

/// Batch fetch with placeholder expansion, wrapped for the caller
pub async fn posts_comments(
    client: Arc<dyn RedditApi>,
    post_ids: Vec<String>,
    limit: u32,
) -> ToolOutcome<PostComments> {
    let options = CommentsOptions {
        post_ids,
        limit,
        expand_more: true,
    };
    let operation = CommentsOperation::with_client(options, client);
    ToolOutcome::from_result("get_posts_comments", operation.execute().await)
}

/// Single-post fetch without expansion, wrapped for the caller
pub async fn comments_from_post(
    client: Arc<dyn RedditApi>,
    post_id: String,
    limit: u32,
) -> ToolOutcome<Vec<CommentSummary>> {
    let options = CommentsOptions {
        post_ids: vec![post_id],
        limit,
        expand_more: false,
    };
    let operation = CommentsOperation::with_client(options, client);
    ToolOutcome::from_result("get_comments_from_post", operation.execute_single().await)
}

/// CLI handler function for the comments command
pub async fn handle_comments_command_with_client(
    post_ids: Vec<String>,
    limit: u32,
    client: Arc<dyn RedditApi>,
) -> bool {
    let outcome = posts_comments(client, post_ids, limit).await;
    println!("{}", outcome.to_json());
    outcome.is_ok()
}

/// CLI handler function for the post-comments command
pub async fn handle_post_comments_command_with_client(
    post_id: String,
    limit: u32,
    client: Arc<dyn RedditApi>,
) -> bool {
    let outcome = comments_from_post(client, post_id, limit).await;
    println!("{}", outcome.to_json());
    outcome.is_ok()
}
