use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

/// Comment data (`kind = "t1"`)
#[derive(Deserialize, Debug, Default, Clone)]
pub struct CommentData {
    pub id: Option<String>,
    pub author: Option<String>,
    pub score: Option<i64>,
    pub body: Option<String>,
    /// Fullname of the parent: `t3_...` for top-level comments, `t1_...` for replies
    pub parent_id: Option<String>,
}

/// "Load more comments" placeholder (`kind = "more"`)
#[derive(Deserialize, Debug, Default, Clone)]
pub struct MoreData {
    pub parent_id: Option<String>,
    /// Ids of the collapsed comments, without the `t1_` prefix
    #[serde(default)]
    pub children: Vec<String>,
}

/// Entry of a comment tree: either a comment or a collapsed placeholder
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", content = "data")]
pub enum CommentThing {
    #[serde(rename = "t1")]
    Comment(CommentData),
    #[serde(rename = "more")]
    More(MoreData),
}

/// Body of `/api/morechildren?api_type=json`
#[derive(Deserialize, Debug)]
pub struct MoreChildrenResponse {
    pub json: MoreChildrenJson,
}

#[derive(Deserialize, Debug)]
pub struct MoreChildrenJson {
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
    pub data: Option<MoreChildrenData>,
}

#[derive(Deserialize, Debug)]
pub struct MoreChildrenData {
    #[serde(default)]
    pub things: Vec<CommentThing>,
}

/// Comment summary returned to tool callers
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct CommentSummary {
    pub comment_id: Option<String>,
    pub comment_author: Option<String>,
    pub comment_score: Option<i64>,
    pub comment_body: Option<String>,
}

impl From<CommentData> for CommentSummary {
    fn from(data: CommentData) -> Self {
        Self {
            comment_id: data.id,
            comment_author: data.author,
            comment_score: data.score,
            comment_body: data.body,
        }
    }
}

/// Comments grouped by post id.
///
/// Serializes as a JSON object whose keys keep the order the posts were
/// requested in. Inserting an id twice keeps the first entry.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PostComments {
    entries: Vec<(String, Vec<CommentSummary>)>,
}

impl PostComments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, post_id: &str) -> bool {
        self.entries.iter().any(|(id, _)| id == post_id)
    }

    pub fn insert(&mut self, post_id: String, comments: Vec<CommentSummary>) {
        if !self.contains(&post_id) {
            self.entries.push((post_id, comments));
        }
    }

    pub fn get(&self, post_id: &str) -> Option<&[CommentSummary]> {
        self.entries
            .iter()
            .find(|(id, _)| id == post_id)
            .map(|(_, comments)| comments.as_slice())
    }

    pub fn post_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }
}

impl Serialize for PostComments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(id, comments)| (id, comments)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Listing;
    use serde::de::IgnoredAny;

    const COMMENT_TREE: &str = r#"[
        {"kind": "Listing", "data": {"after": null, "before": null, "children": [
            {"kind": "t3", "data": {"id": "abc123", "title": "post"}}
        ]}},
        {"kind": "Listing", "data": {"after": null, "before": null, "children": [
            {"kind": "t1", "data": {
                "id": "c1", "author": "alice", "score": 57, "body": "First!",
                "parent_id": "t3_abc123", "replies": ""
            }},
            {"kind": "t1", "data": {
                "id": "c2", "author": "[deleted]", "score": 3, "body": "[removed]",
                "parent_id": "t3_abc123",
                "replies": {"kind": "Listing", "data": {"children": []}}
            }},
            {"kind": "more", "data": {
                "count": 12, "parent_id": "t3_abc123", "children": ["c3", "c4"]
            }}
        ]}}
    ]"#;

    #[test]
    fn comment_tree_decodes_comments_and_placeholders() {
        let (_post, comments): (Listing<IgnoredAny>, Listing<CommentThing>) =
            serde_json::from_str(COMMENT_TREE).unwrap();

        let things = comments.data.children;
        assert_eq!(things.len(), 3);
        match &things[0] {
            CommentThing::Comment(c) => {
                assert_eq!(c.id.as_deref(), Some("c1"));
                assert_eq!(c.author.as_deref(), Some("alice"));
                assert_eq!(c.score, Some(57));
                assert_eq!(c.body.as_deref(), Some("First!"));
            }
            other => panic!("expected a comment, got {:?}", other),
        }
        match &things[2] {
            CommentThing::More(more) => {
                assert_eq!(more.children, vec!["c3", "c4"]);
                assert_eq!(more.parent_id.as_deref(), Some("t3_abc123"));
            }
            other => panic!("expected a placeholder, got {:?}", other),
        }
    }

    #[test]
    fn morechildren_response_decodes_things() {
        let body = r#"{"json": {"errors": [], "data": {"things": [
            {"kind": "t1", "data": {"id": "c3", "body": "late reply", "parent_id": "t3_abc123"}},
            {"kind": "t1", "data": {"id": "c5", "body": "nested", "parent_id": "t1_c3"}}
        ]}}}"#;
        let parsed: MoreChildrenResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.json.errors.is_empty());
        assert_eq!(parsed.json.data.unwrap().things.len(), 2);
    }

    #[test]
    fn comment_summary_keeps_missing_author_as_null() {
        let data: CommentData = serde_json::from_str(r#"{"id": "c9", "body": "hi"}"#).unwrap();
        let value = serde_json::to_value(CommentSummary::from(data)).unwrap();
        assert_eq!(value["comment_id"], "c9");
        assert_eq!(value["comment_body"], "hi");
        assert!(value["comment_author"].is_null());
        assert!(value["comment_score"].is_null());
    }

    #[test]
    fn post_comments_serializes_in_insertion_order() {
        let mut grouped = PostComments::new();
        grouped.insert("zzz".to_string(), vec![]);
        grouped.insert("aaa".to_string(), vec![]);
        grouped.insert("zzz".to_string(), vec![CommentSummary::from(CommentData::default())]);

        assert_eq!(grouped.post_ids().count(), 2);
        assert_eq!(grouped.get("zzz").map(|c| c.len()), Some(0));

        let json = serde_json::to_string(&grouped).unwrap();
        assert_eq!(json, r#"{"zzz":[],"aaa":[]}"#);
    }
}
