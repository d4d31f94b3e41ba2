//! Terminal rendering of council output.

use colored::{ColoredString, Colorize};
use parliament_core::meeting::FinalReport;
use parliament_core::session::{DeliberationStage, Message, MessageKind, Phase, SessionEvent};
use parliament_core::tally::{Vote, VoteTally};

fn paint(kind: MessageKind, text: &str) -> ColoredString {
    match kind {
        MessageKind::System => text.bright_magenta(),
        MessageKind::Discussion => text.bright_blue(),
        MessageKind::Motion => text.yellow(),
        MessageKind::Voting => text.cyan(),
        MessageKind::Conclusion => text.bright_green().bold(),
        MessageKind::User => text.green(),
        MessageKind::Response => text.bright_cyan(),
        MessageKind::Error => text.red().bold(),
    }
}

/// `[time] Speaker (Role): content`
pub fn message_line(message: &Message) -> String {
    let speaker = match &message.role {
        Some(role) => format!("{} ({role})", message.speaker),
        None => message.speaker.clone(),
    };
    format!(
        "[{}] {speaker}: {}",
        message.timestamp.format("%H:%M:%S"),
        message.content
    )
}

pub fn print_message(message: &Message) {
    println!("{}", paint(message.kind, &message_line(message)));
}

pub fn print_phase(phase: Phase) {
    println!();
    println!("{}", format!("== {} ==", phase.title()).bright_magenta().bold());
}

pub fn print_stage(stage: DeliberationStage, progress: u8) {
    println!();
    println!(
        "{}",
        format!("{} {} [{progress}%]", stage.icon(), stage.title())
            .bright_magenta()
            .bold()
    );
}

/// Prints a session event as it arrives.
pub fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::PhaseStarted { phase } => print_phase(*phase),
        SessionEvent::StageChanged { stage, progress } => print_stage(*stage, *progress),
        SessionEvent::MessageAppended { message } => print_message(message),
        SessionEvent::TallyRecorded { tally } => print_tally(tally),
        SessionEvent::Adjourned => println!("{}", "The session is adjourned.".bright_green()),
        SessionEvent::Abandoned { reached } => {
            let reached = reached.map(|p| p.title()).unwrap_or("before opening");
            println!(
                "{}",
                format!("Session abandoned ({reached}).").yellow()
            );
        }
    }
}

pub fn print_tally(tally: &VoteTally) {
    for ballot in tally.iter() {
        let vote = match ballot.vote {
            Vote::Aye => "aye".green(),
            Vote::Nay => "nay".red(),
        };
        println!("  {:<24} {vote}", ballot.voter);
    }
}

pub fn print_report(report: &FinalReport) {
    println!();
    println!("{}", "=== Final Report ===".bright_magenta().bold());
    println!(
        "{} {} ({:.2}/10, {} ideas evaluated)",
        "Winning idea:".bold(),
        report.winning_idea.persona_name,
        report.final_score,
        report.total_ideas_evaluated
    );
    println!("  {}", report.winning_idea.idea.bright_blue());
    println!();
    println!("{}", "Implementation plan".bold());
    println!("{}", report.implementation_plan);
    println!();
    println!("{}", "Follow-up questions".bold());
    println!("{}", report.follow_up_questions);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_line_includes_role() {
        let message = Message::new("The Ego", "Order!", MessageKind::System).with_role("Mediator");
        let line = message_line(&message);
        assert!(line.ends_with("] The Ego (Mediator): Order!"), "{line}");

        let plain = Message::new("The ID", "Now!", MessageKind::Discussion);
        assert!(message_line(&plain).ends_with("] The ID: Now!"));
    }
}
