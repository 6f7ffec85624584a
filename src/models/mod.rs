use serde::Deserialize;

pub mod comment;
pub mod post;
pub mod subreddit;

pub use comment::{
    CommentData, CommentSummary, CommentThing, MoreChildrenResponse, MoreData, PostComments,
};
pub use post::{CategorizedThreads, PostData, PostSummary, SortOrder, ThreadListing};
pub use subreddit::{SubredditData, SubredditSummary};

/// Top-level envelope for Reddit listings
#[derive(Deserialize, Debug)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

/// Page of children in a listing.
///
/// Only the first page is ever read, so the `after`/`before` cursors are skipped.
#[derive(Deserialize, Debug)]
pub struct ListingData<T> {
    pub children: Vec<T>,
}

/// Reddit "thing" with kind and data fields
#[derive(Deserialize, Debug)]
pub struct Thing<T> {
    pub kind: String,
    pub data: T,
}

impl<T> Listing<Thing<T>> {
    /// Unwrap the data of every child, keeping listing order
    pub fn into_data(self) -> Vec<T> {
        self.data.children.into_iter().map(|thing| thing.data).collect()
    }
}

/// Base URL used for permalinks in summaries
pub const REDDIT_WEB_BASE: &str = "https://www.reddit.com";

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug)]
    struct Named {
        name: Option<String>,
    }

    #[test]
    fn listing_unwraps_children_in_order() {
        let body = r#"{
            "kind": "Listing",
            "data": {
                "after": "t3_b",
                "before": null,
                "children": [
                    {"kind": "t3", "data": {"name": "t3_a"}},
                    {"kind": "t3", "data": {"name": "t3_b"}}
                ]
            }
        }"#;
        let listing: Listing<Thing<Named>> = serde_json::from_str(body).unwrap();
        let names: Vec<_> = listing.into_data().into_iter().map(|n| n.name).collect();
        assert_eq!(names, vec![Some("t3_a".to_string()), Some("t3_b".to_string())]);
    }
}
