use anyhow::{Context, Result};
use colored::Colorize;
use parliament_core::cache::TopicCache;
use parliament_core::topic::TopicDraft;
use parliament_infrastructure::FileTopicCache;

pub fn run(topic: String, description: Option<String>, proposer: Option<String>) -> Result<()> {
    let mut draft = TopicDraft::new(topic);
    if let Some(description) = description {
        draft = draft.with_description(description);
    }
    if let Some(proposer) = proposer {
        draft = draft.with_proposer(proposer);
    }
    let topic = draft.into_topic()?;

    let cache = FileTopicCache::new()?;
    cache
        .store(&topic)
        .with_context(|| format!("Failed to write {}", cache.path().display()))?;

    println!(
        "{} \"{}\" proposed by {}",
        "Topic placed before the council:".bright_green(),
        topic.text(),
        topic.proposer()
    );
    println!("{}", "Run `parliament convene` to open the session.".bright_black());
    Ok(())
}
