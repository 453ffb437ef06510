use crate::error::{Result, SpellfixError};
use crate::interactive::{Action, Choice, Prompter};
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

/// Asks questions on the terminal's stderr so stdout stays clean.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
    term: Term,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            term: Term::stderr(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, choices: &[Choice], default: usize) -> Result<Action> {
        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();

        let picked = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(&labels)
            .default(default)
            .interact_on(&self.term)?;

        choices
            .get(picked)
            .map(|choice| choice.action)
            .ok_or_else(|| SpellfixError::UnrecognisedAction(format!("menu entry {}", picked)))
    }

    fn input(&mut self, message: &str, default: &str) -> Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(message)
            .with_initial_text(default)
            .allow_empty(true)
            .interact_text_on(&self.term)?;
        Ok(answer)
    }
}
