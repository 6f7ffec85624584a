use crate::client::RedditClientError;
use crate::models::REDDIT_WEB_BASE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Post data from a subreddit listing (`kind = "t3"`).
///
/// Only the fields the summaries need are modelled, and all of them are
/// optional so a post with a missing attribute still maps.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct PostData {
    pub id: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub selftext: Option<String>,
    pub num_comments: Option<i64>,
    pub score: Option<i64>,
    pub url: Option<String>,
    pub permalink: Option<String>,
    pub created_utc: Option<f64>,
    pub subreddit: Option<String>,
}

/// Post summary returned to tool callers
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PostSummary {
    pub post_id: Option<String>,
    pub post_author: Option<String>,
    pub post_title: Option<String>,
    pub post_body: Option<String>,
    pub post_comment_count: Option<i64>,
    pub post_score: Option<i64>,
    pub post_url: Option<String>,
    pub post_permalink: Option<String>,
    pub post_created_utc: Option<DateTime<Utc>>,
    pub post_subreddit: Option<String>,
}

impl From<PostData> for PostSummary {
    fn from(data: PostData) -> Self {
        let created = data
            .created_utc
            .and_then(|ts| DateTime::from_timestamp(ts as i64, 0));

        Self {
            post_id: data.id,
            post_author: data.author,
            post_title: data.title,
            post_body: data.selftext,
            post_comment_count: data.num_comments,
            post_score: data.score,
            post_url: data.url,
            post_permalink: data
                .permalink
                .map(|path| format!("{}{}", REDDIT_WEB_BASE, path)),
            post_created_utc: created,
            post_subreddit: data.subreddit,
        }
    }
}

/// Ranking used to select posts from a subreddit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Hot,
    New,
    Top,
    Controversial,
}

impl SortOrder {
    /// Every category, in the order the multi-category listing fetches them
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Hot,
        SortOrder::New,
        SortOrder::Top,
        SortOrder::Controversial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Hot => "hot",
            SortOrder::New => "new",
            SortOrder::Top => "top",
            SortOrder::Controversial => "controversial",
        }
    }

    /// Time window for sorts that accept one
    pub fn time_filter(&self) -> Option<&'static str> {
        match self {
            SortOrder::Top | SortOrder::Controversial => Some("all"),
            SortOrder::Hot | SortOrder::New => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = RedditClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hot" => Ok(SortOrder::Hot),
            "new" => Ok(SortOrder::New),
            "top" => Ok(SortOrder::Top),
            "controversial" => Ok(SortOrder::Controversial),
            _ => Err(RedditClientError::InvalidArgument(format!(
                "Invalid sort_by value '{}'. Use 'hot', 'new', 'top', or 'controversial'.",
                s
            ))),
        }
    }
}

/// Posts for every category, serialized with exactly four keys
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct CategorizedThreads {
    pub hot: Vec<PostSummary>,
    pub new: Vec<PostSummary>,
    pub top: Vec<PostSummary>,
    pub controversial: Vec<PostSummary>,
}

impl CategorizedThreads {
    pub fn category_mut(&mut self, sort: SortOrder) -> &mut Vec<PostSummary> {
        match sort {
            SortOrder::Hot => &mut self.hot,
            SortOrder::New => &mut self.new,
            SortOrder::Top => &mut self.top,
            SortOrder::Controversial => &mut self.controversial,
        }
    }

    pub fn category(&self, sort: SortOrder) -> &[PostSummary] {
        match sort {
            SortOrder::Hot => &self.hot,
            SortOrder::New => &self.new,
            SortOrder::Top => &self.top,
            SortOrder::Controversial => &self.controversial,
        }
    }
}

/// Result of a thread listing: one list per category, or a single sorted list
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ThreadListing {
    Categorized(CategorizedThreads),
    Sorted(Vec<PostSummary>),
}
