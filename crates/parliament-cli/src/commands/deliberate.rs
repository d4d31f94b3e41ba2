use anyhow::{Context, Result};
use colored::Colorize;
use parliament_application::{DeliberationService, MeetingRoom};
use parliament_core::config::{RootConfig, SecretConfig};
use parliament_core::meeting::{CouncilBackend, MeetingRepository, MeetingRequest};
use parliament_core::persona::PersonaCatalog;
use parliament_core::topic::Topic;
use parliament_infrastructure::{FileTopicCache, JsonDirMeetingRepository, SecretService};
use parliament_interaction::{CouncilAssembly, RemoteCouncilClient};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{render, resolve_topic};

/// Deliberates with locally seated agents.
pub async fn run_local(words: Vec<String>, offline: bool, config: &RootConfig) -> Result<()> {
    let topic = resolve_topic(words, &FileTopicCache::new()?)?;
    let catalog = PersonaCatalog::council();

    let secrets = if offline {
        SecretConfig::default()
    } else {
        SecretService::new()?.load().context("Failed to read API credentials")?
    };
    let assembly = CouncilAssembly::from_secrets(&catalog, &secrets, offline);
    let repository: Arc<dyn MeetingRepository> =
        Arc::new(JsonDirMeetingRepository::default_location().await?);
    let service = DeliberationService::new(&catalog, assembly.into_agents(), repository)?;

    hold(Arc::new(service), &catalog, &topic, config).await
}

/// Deliberates through a remote council server.
pub async fn run_remote(url: Option<String>, words: Vec<String>, config: &RootConfig) -> Result<()> {
    let base_url = url
        .or_else(|| config.remote.base_url.clone())
        .context("No remote council configured: pass --url or set [remote].base_url")?;
    let topic = resolve_topic(words, &FileTopicCache::new()?)?;
    let client = RemoteCouncilClient::new(base_url, Duration::from_secs(config.remote.timeout_secs))?;

    hold(Arc::new(client), &PersonaCatalog::council(), &topic, config).await
}

async fn hold(
    backend: Arc<dyn CouncilBackend>,
    catalog: &PersonaCatalog,
    topic: &Topic,
    config: &RootConfig,
) -> Result<()> {
    let (tx, mut events) = mpsc::unbounded_channel();
    let room = Arc::new(MeetingRoom::new(backend, catalog, config.deliberation.clone()).with_events(tx));
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            render::print_event(&event);
        }
    });
    let questioner = spawn_questioner(Arc::clone(&room));

    println!(
        "{} {}",
        "The council deliberates on".bright_magenta().bold(),
        format!("\"{}\"", topic.text()).bold()
    );
    let result = tokio::select! {
        result = room.run(MeetingRequest::from(topic)) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    if let Some(questioner) = questioner {
        questioner.abort();
        let _ = questioner.await;
    }
    drop(room);
    let _ = printer.await;

    match result {
        Some(Ok(report)) => {
            render::print_report(&report);
            Ok(())
        }
        Some(Err(e)) => Err(e).context("The deliberation did not complete"),
        None => {
            println!("{}", "Deliberation interrupted.".yellow());
            Ok(())
        }
    }
}

/// Forwards lines typed during the deliberation to the room as the
/// questioner's remarks. Only active when stdin is a terminal.
fn spawn_questioner(room: Arc<MeetingRoom>) -> Option<JoinHandle<()>> {
    if !std::io::stdin().is_terminal() {
        return None;
    }
    let (tx, mut lines) = mpsc::unbounded_channel::<String>();
    // A plain thread: a blocking stdin read cannot be cancelled on shutdown.
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    Some(tokio::spawn(async move {
        while let Some(line) = lines.recv().await {
            room.speak(&line).await;
        }
    }))
}
