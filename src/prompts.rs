//! Prompt templates served alongside the tools

pub const DEFAULT_PROMPT_LIMIT: u32 = 10;
pub const DEFAULT_SUBREDDIT_COUNT: u32 = 3;

/// Instructions for researching what Reddit says about a topic.
///
/// Pure formatting: the same arguments always produce the same text.
pub fn reddit_post_summary_prompt(topic: &str, limit: u32, subreddit_count: u32) -> String {
    format!(
        r#"Find out what Reddit is discussing about '{topic}'. Start by finding {subreddit_count} relevant subreddits: call `get_relevant_subreddits` with the topic (or search the web), then confirm each candidate with `get_subreddit_list_info`. Once you have the subreddits, follow these instructions:

    1. For each subreddit, use the `get_relevant_threads` tool to find relevant posts across the hot, new, top and controversial categories.

    2. From the posts you obtained in step 1, keep the top `{limit}` posts:
       - Top posts are the ones with the highest score (upvotes) and the most comments (engagement).

    3. For the posts you kept, invoke the tool `get_posts_comments` with their post ids to fetch the top `{limit}` comments of each post.

    4. After collecting posts and comments, analyze the data:
       - Common themes across posts and comments related to '{topic}'
       - Most discussed subtopics or areas of focus (e.g., trends, needs, pain points)
       - Keywords or phrases that emerge frequently across posts and comments
       - The overall sentiment of the discussion

    5. Provide a high-level summary of the main discussions about '{topic}'.
       - Highlight insights such as:
         - What people are excited about or frustrated with
         - Popular subtopics, opinions, or customer pain points
       - Name the subreddits and posts your conclusions are drawn from.
"#,
        topic = topic,
        limit = limit,
        subreddit_count = subreddit_count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_deterministic() {
        let first = reddit_post_summary_prompt("home espresso", 7, 3);
        let second = reddit_post_summary_prompt("home espresso", 7, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn prompt_mentions_topic_limits_and_tools() {
        let prompt = reddit_post_summary_prompt("home espresso", 7, 4);
        assert!(prompt.contains("'home espresso'"));
        assert!(prompt.contains("top `7` posts"));
        assert!(prompt.contains("top `7` comments"));
        assert!(prompt.contains("finding 4 relevant subreddits"));
        for tool in [
            "get_relevant_subreddits",
            "get_subreddit_list_info",
            "get_relevant_threads",
            "get_posts_comments",
        ] {
            assert!(prompt.contains(tool), "missing {}", tool);
        }
    }

    #[test]
    fn different_topics_give_different_prompts() {
        assert_ne!(
            reddit_post_summary_prompt("rust", 10, 3),
            reddit_post_summary_prompt("go", 10, 3)
        );
    }
}
