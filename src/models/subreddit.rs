use serde::{Deserialize, Serialize};

/// Subreddit data as returned by `/r/{name}/about` and `/subreddits/search`.
///
/// Every field is optional: Reddit omits fields for quarantined, private or
/// banned communities, and a missing field must not fail the whole call.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct SubredditData {
    pub display_name: Option<String>,
    pub public_description: Option<String>,
    pub subscribers: Option<i64>,
    pub active_user_count: Option<i64>,
    /// Older name for `active_user_count`, still sent by some endpoints
    pub accounts_active: Option<i64>,
}

/// Subreddit summary returned to tool callers
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SubredditSummary {
    pub subreddit_name: Option<String>,
    pub subreddit_description: Option<String>,
    pub subreddit_subscriber_count: Option<i64>,
    pub subreddit_active_users: Option<i64>,
}

impl From<SubredditData> for SubredditSummary {
    fn from(data: SubredditData) -> Self {
        Self {
            subreddit_name: data.display_name,
            subreddit_description: data.public_description,
            subreddit_subscriber_count: data.subscribers,
            subreddit_active_users: data.active_user_count.or(data.accounts_active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Thing;

    #[test]
    fn about_response_maps_to_summary() {
        let body = r#"{
            "kind": "t5",
            "data": {
                "display_name": "rust",
                "public_description": "A place for all things Rust",
                "subscribers": 340000,
                "active_user_count": 812,
                "over18": false
            }
        }"#;
        let thing: Thing<SubredditData> = serde_json::from_str(body).unwrap();
        assert_eq!(thing.kind, "t5");

        let summary = SubredditSummary::from(thing.data);
        assert_eq!(summary.subreddit_name.as_deref(), Some("rust"));
        assert_eq!(
            summary.subreddit_description.as_deref(),
            Some("A place for all things Rust")
        );
        assert_eq!(summary.subreddit_subscriber_count, Some(340000));
        assert_eq!(summary.subreddit_active_users, Some(812));
    }

    #[test]
    fn missing_fields_serialize_as_null() {
        let data: SubredditData = serde_json::from_str(r#"{"display_name": "tiny"}"#).unwrap();
        let value = serde_json::to_value(SubredditSummary::from(data)).unwrap();

        assert_eq!(value["subreddit_name"], "tiny");
        assert!(value["subreddit_description"].is_null());
        assert!(value["subreddit_subscriber_count"].is_null());
        assert!(value["subreddit_active_users"].is_null());
    }

    #[test]
    fn accounts_active_is_used_when_active_user_count_is_absent() {
        let data = SubredditData {
            accounts_active: Some(42),
            ..Default::default()
        };
        assert_eq!(SubredditSummary::from(data).subreddit_active_users, Some(42));
    }
}
