//! Line-oriented prompts over any buffered reader.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::io::{self, BufRead, Write};

pub struct Prompter<R> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> AppResult<Option<String>> {
        print!("{}: ", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`ask`](Self::ask), an empty answer yields `default`.
    pub fn ask_or(&mut self, prompt: &str, default: &str) -> AppResult<Option<String>> {
        let answer = self.ask(&format!("{} [{}]", prompt, default))?;
        Ok(answer.map(|a| if a.is_empty() { default.to_string() } else { a }))
    }

    pub fn confirm(&mut self, prompt: &str) -> AppResult<bool> {
        warning(prompt);
        let answer = self.ask("Confirm [y/N]")?.unwrap_or_default();
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }
}

/// Ask a yes/no confirmation on stdin.
pub fn ask_confirmation(prompt: &str) -> AppResult<bool> {
    let stdin = io::stdin();
    Prompter::new(stdin.lock()).confirm(prompt)
}
