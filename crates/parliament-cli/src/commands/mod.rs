pub mod cache;
pub mod convene;
pub mod deliberate;
pub mod personas;
pub mod phases;
pub mod propose;
pub mod render;

use anyhow::{Result, bail};
use parliament_core::cache::TopicCache;
use parliament_core::topic::{Topic, TopicDraft};

/// The topic given on the command line, else the proposed one (consumed).
pub fn resolve_topic(words: Vec<String>, cache: &dyn TopicCache) -> Result<Topic> {
    let text = words.join(" ");
    if !text.trim().is_empty() {
        return Ok(TopicDraft::new(text).into_topic()?);
    }
    match cache.take()? {
        Some(topic) => Ok(topic),
        None => bail!("No topic before the council. Pass one, or run `parliament propose <topic>` first."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parliament_infrastructure::{FileTopicCache, MemoryTopicCache};

    #[test]
    fn test_argument_wins_and_leaves_cache() {
        let cache = MemoryTopicCache::new();
        cache.store(&TopicDraft::new("cached").into_topic().unwrap()).unwrap();

        let topic = resolve_topic(vec!["city".into(), "parks".into()], &cache).unwrap();
        assert_eq!(topic.text(), "city parks");
        assert!(cache.load().unwrap().is_some());
    }

    #[test]
    fn test_cached_topic_is_consumed() {
        let cache = MemoryTopicCache::new();
        cache.store(&TopicDraft::new("cached").into_topic().unwrap()).unwrap();

        assert_eq!(resolve_topic(Vec::new(), &cache).unwrap().text(), "cached");
        assert!(resolve_topic(Vec::new(), &cache).is_err());
    }

    #[test]
    fn test_blank_cached_topic_does_not_convene() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let cache = FileTopicCache::with_path(temp_dir.path().join("topic_cache.json"));
        std::fs::write(
            cache.path(),
            r#"{"currentMeeting":{"topic":"  ","proposedBy":"","timestamp":"2025-07-15T12:34:56Z"}}"#,
        )
        .unwrap();

        assert!(resolve_topic(Vec::new(), &cache).is_err());
    }
}
