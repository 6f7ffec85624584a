//! Operations module provides the tools exposed over MCP and the CLI

pub mod comments;
pub mod outcome;
pub mod subreddit_info;
pub mod subreddit_search;
pub mod threads;

pub use outcome::{ErrorKind, ToolError, ToolOutcome};

use crate::client::RedditClientError;

/// Largest page size Reddit serves in a single listing request
pub const MAX_LIMIT: u32 = 100;

/// Longest subreddit name Reddit allows
pub const MAX_SUBREDDIT_NAME_LEN: usize = 21;

/// Strip an optional `r/` or `/r/` prefix from a subreddit name.
///
/// The result is spliced into request paths, so only ASCII letters, digits
/// and `_` are accepted.
pub fn normalize_subreddit_name(name: &str) -> Result<String, RedditClientError> {
    let trimmed = name.trim().trim_start_matches('/');
    let bare = trimmed
        .strip_prefix("r/")
        .or_else(|| trimmed.strip_prefix("R/"))
        .unwrap_or(trimmed)
        .trim_end_matches('/');

    if bare.is_empty() {
        return Err(RedditClientError::InvalidArgument(
            "Subreddit name must not be empty".to_string(),
        ));
    }
    if bare.len() > MAX_SUBREDDIT_NAME_LEN
        || !bare.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(RedditClientError::InvalidArgument(format!(
            "Invalid subreddit name '{}'",
            name.trim()
        )));
    }
    Ok(bare.to_string())
}

/// Strip an optional `t3_` fullname prefix from a post id.
///
/// Post ids are base36, so anything other than ASCII letters and digits is rejected.
pub fn normalize_post_id(post_id: &str) -> Result<String, RedditClientError> {
    let trimmed = post_id.trim();
    let bare = trimmed.strip_prefix("t3_").unwrap_or(trimmed);

    if bare.is_empty() {
        return Err(RedditClientError::InvalidArgument(
            "Post id must not be empty".to_string(),
        ));
    }
    if !bare.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(RedditClientError::InvalidArgument(format!(
            "Invalid post id '{}'",
            trimmed
        )));
    }
    Ok(bare.to_ascii_lowercase())
}

/// Check a per-request limit against Reddit's page size
pub fn validate_limit(limit: u32) -> Result<u32, RedditClientError> {
    if limit == 0 || limit > MAX_LIMIT {
        return Err(RedditClientError::InvalidArgument(format!(
            "limit must be between 1 and {}, got {}",
            MAX_LIMIT, limit
        )));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subreddit_prefixes_are_stripped() {
        assert_eq!(normalize_subreddit_name("rust").unwrap(), "rust");
        assert_eq!(normalize_subreddit_name("r/rust").unwrap(), "rust");
        assert_eq!(normalize_subreddit_name(" /r/rust/ ").unwrap(), "rust");
        assert!(normalize_subreddit_name("r/").is_err());
        assert!(normalize_subreddit_name("   ").is_err());
    }

    #[test]
    fn post_fullnames_are_accepted() {
        assert_eq!(normalize_post_id("t3_abc123").unwrap(), "abc123");
        assert_eq!(normalize_post_id("abc123").unwrap(), "abc123");
        assert!(normalize_post_id("t3_").is_err());
        assert_eq!(normalize_post_id("T3ABC").unwrap(), "t3abc");
    }

    fn is_invalid_argument(result: Result<String, RedditClientError>) -> bool {
        matches!(result, Err(RedditClientError::InvalidArgument(_)))
    }

    #[test]
    fn subreddit_names_cannot_escape_the_path() {
        for name in [
            "rust/../../api/v1/me",
            "rust/hot",
            "..",
            "rust?limit=100",
            "rust#about",
            "rust%2F..",
            "r/rust lang",
        ] {
            assert!(is_invalid_argument(normalize_subreddit_name(name)), "{}", name);
        }
        assert_eq!(normalize_subreddit_name("Rust_Gamedev").unwrap(), "Rust_Gamedev");
        assert!(normalize_subreddit_name(&"a".repeat(21)).is_ok());
        assert!(is_invalid_argument(normalize_subreddit_name(&"a".repeat(22))));
    }

    #[test]
    fn post_ids_must_be_base36() {
        for id in ["abc?sort=new#", "abc/def", "..", "t3_abc#", "abc_def", "t1_abc"] {
            assert!(is_invalid_argument(normalize_post_id(id)), "{}", id);
        }
    }

    #[test]
    fn limits_outside_page_size_are_rejected() {
        assert!(validate_limit(0).is_err());
        assert_eq!(validate_limit(1).unwrap(), 1);
        assert_eq!(validate_limit(100).unwrap(), 100);
        assert!(validate_limit(101).is_err());
    }
}
