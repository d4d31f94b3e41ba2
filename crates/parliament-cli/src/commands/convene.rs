use anyhow::Result;
use colored::Colorize;
use parliament_application::PhaseSequencer;
use parliament_core::config::RootConfig;
use parliament_core::error::ParliamentError;
use parliament_core::persona::PersonaCatalog;
use parliament_infrastructure::FileTopicCache;
use tokio_util::sync::CancellationToken;

use super::{render, resolve_topic};

pub async fn run(words: Vec<String>, seed: Option<u64>, speed: f64, config: &RootConfig) -> Result<()> {
    let cache = FileTopicCache::new()?;
    let topic = resolve_topic(words, &cache)?;

    let mut sequencer = PhaseSequencer::new(PersonaCatalog::council(), config.simulation.scaled(speed));
    if let Some(seed) = seed {
        sequencer = sequencer.with_seed(seed);
    }
    let mut events = sequencer.subscribe();
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            render::print_event(&event);
        }
    });

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    println!(
        "{} {}",
        "Convening the council on".bright_magenta().bold(),
        format!("\"{}\"", topic.text()).bold()
    );
    let outcome = sequencer.run(&topic, cancel).await;
    interrupt.abort();
    let _ = printer.await;

    let heard = outcome.transcript().len();
    match outcome.into_tally() {
        Ok(tally) => {
            let verdict = if tally.carried() {
                "The motion is carried.".bright_green().bold()
            } else {
                "The motion fails.".red().bold()
            };
            println!();
            println!("{verdict} ({})", tally.summary());
        }
        Err(ParliamentError::Cancelled(phase)) => {
            println!();
            println!(
                "{}",
                format!("Session interrupted during {phase} after {heard} messages.").yellow()
            );
        }
        Err(other) => return Err(other.into()),
    }
    Ok(())
}
