use colored::Colorize;
use parliament_core::session::Phase;

pub fn run() {
    for (step, phase) in Phase::ORDER.iter().enumerate() {
        println!("{}", format!("{}. {}", step + 1, phase.title()).bright_magenta().bold());
        println!("   {}", phase.description());
    }
}
