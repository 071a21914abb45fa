use std::io::{BufRead, Write};
use std::sync::Mutex;

/// Interactive yes/no confirmation and operator notifications.
pub trait UserPrompt {
    fn confirm(&self, message: &str) -> bool;
    fn notify(&self, message: &str);
}

/// Prompts on the controlling terminal.
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl UserPrompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} {} ", yansi::Paint::new(message).yellow().bold(), yansi::Paint::new("[y/N]").dim());
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(_) => is_affirmative(&line),
            Err(e) => {
                tracing::warn!(%e, "Failed to read confirmation");
                false
            }
        }
    }

    fn notify(&self, message: &str) {
        eprintln!("{}", yansi::Paint::new(message).red());
    }
}

/// Prompt backed by a submitted form: the confirmation answer was already
/// given on the confirmation page, notifications are collected as flash
/// messages for the next render.
pub struct FormPrompt {
    confirmed: bool,
    notices: Mutex<Vec<String>>,
}

impl FormPrompt {
    pub fn new(confirmed: bool) -> Self {
        Self {
            confirmed,
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn into_notices(self) -> Vec<String> {
        self.notices.into_inner().unwrap_or_default()
    }
}

impl UserPrompt for FormPrompt {
    fn confirm(&self, _message: &str) -> bool {
        self.confirmed
    }

    fn notify(&self, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(message.to_string());
        }
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_answers() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("no"));
    }

    #[test]
    fn form_prompt_collects_notices() {
        let prompt = FormPrompt::new(false);
        assert!(!prompt.confirm("Delete?"));
        prompt.notify("Failed to delete instance");
        assert_eq!(prompt.into_notices(), vec!["Failed to delete instance".to_string()]);
    }
}
