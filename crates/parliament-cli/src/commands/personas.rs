use anyhow::Result;
use colored::Colorize;
use parliament_core::persona::{PersonaCatalog, observer_seats};

pub fn run(json: bool) -> Result<()> {
    let catalog = PersonaCatalog::council();
    if json {
        println!("{}", serde_json::to_string_pretty(catalog.as_slice())?);
        return Ok(());
    }

    println!("{}", "=== The Council ===".bright_magenta().bold());
    for (seat, persona) in catalog.iter().enumerate() {
        let star = if persona.seat.is_top_llm { " ★" } else { "" };
        println!(
            "{:>2}. {}{} - {} [{}, {} seat]",
            seat + 1,
            persona.name.bold(),
            star,
            persona.role.cyan(),
            persona.temperament,
            persona.seat.special_seat
        );
        println!("    {}", persona.description.bright_black());
    }

    println!();
    println!("{}", "=== Observers ===".bright_magenta().bold());
    for observer in observer_seats() {
        let voice = if observer.can_participate { "may speak" } else { "silent" };
        println!("    {} - {} ({voice})", observer.name.bold(), observer.role.cyan());
    }
    Ok(())
}
