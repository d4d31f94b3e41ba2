use anyhow::Result;
use colored::Colorize;
use parliament_core::cache::TopicCache;
use parliament_infrastructure::FileTopicCache;

pub fn show() -> Result<()> {
    let cache = FileTopicCache::new()?;
    match cache.load()? {
        Some(topic) => println!("{}", serde_json::to_string_pretty(&topic)?),
        None => println!("{}", "No topic is pending.".bright_black()),
    }
    Ok(())
}

pub fn clear() -> Result<()> {
    FileTopicCache::new()?.clear()?;
    println!("{}", "Topic cache cleared.".bright_green());
    Ok(())
}
