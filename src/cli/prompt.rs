use std::io::{self, BufRead, Write};

use crate::controller::Confirm;

/// Confirmation read from the terminal; `--yes` answers for the operator.
#[derive(Debug, Clone, Copy)]
pub struct StdinConfirm {
    assume_yes: bool,
}

impl StdinConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match ask(&format!("{prompt} [y/N] ")) {
            Ok(answer) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prints `prompt` to stderr and reads one line from stdin.
pub fn ask(prompt: &str) -> io::Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Uses `provided` when given, otherwise asks on the terminal.
pub fn password_or_prompt(provided: Option<String>) -> io::Result<String> {
    match provided {
        Some(password) => Ok(password),
        None => ask("Password: "),
    }
}
