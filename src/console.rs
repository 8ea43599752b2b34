use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::errors::InputError;
use crate::services::RunOutcome;

/// Ask for the session results path on stdin. A blank answer picks `default`.
pub fn prompt_input_path(default: &Path) -> Result<PathBuf> {
    print!(
        "Session results file (blank for {}): ",
        default.display().to_string().bold()
    );
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read the session results path")?;

    Ok(clean_path_answer(&answer)
        .map(PathBuf::from)
        .unwrap_or_else(|| default.to_path_buf()))
}

/// Trim whitespace and one layer of surrounding quotes, as pasted from a file manager.
pub fn clean_path_answer(answer: &str) -> Option<&str> {
    let trimmed = answer.trim();
    let trimmed = trimmed.trim_matches('"').trim_matches('\'');
    (!trimmed.is_empty()).then_some(trimmed)
}

pub fn wait_for_acknowledgement() {
    print!("\nPress Enter to exit...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

pub fn report_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Updated(summary) => {
            println!("{}", "✅ Done!".green().bold());
            println!(
                "  - {} new matches appended to {}",
                summary.scored_matches,
                summary.delta_ledger.display()
            );
            println!(
                "  - {} new matches appended to {}",
                summary.scored_matches,
                summary.rating_ledger.display()
            );
            let games = summary
                .games_played
                .iter()
                .map(|(player, count)| format!("{player}: {count}"))
                .collect::<Vec<_>>()
                .join(", ");
            println!("📊 Games played: {games}");
        }
        RunOutcome::NoNewMatches => {
            println!("{}", "No new matches to process; ledgers left untouched.".yellow());
        }
    }
}

pub fn report_error(error: &anyhow::Error) {
    let message = match error.downcast_ref::<InputError>() {
        Some(InputError::Missing(path)) => {
            format!("Session results file not found: {}", path.display())
        }
        Some(input_error) => format!("Could not read session results: {input_error:#}"),
        None => format!("{error:#}"),
    };
    eprintln!("{} {}", "❌".red(), message.red());
}
