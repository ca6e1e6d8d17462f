//! Prompt for the interactive completion tester

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Prompt showing the command being completed
pub struct PicocompPrompt {
    /// Command name shown in the prompt
    program: String,
}

impl PicocompPrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `program` - Command whose invocation lines are completed
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Prompt for PicocompPrompt {
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        format!("[{}]$ ", self.program).into()
    }

    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        "> ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_prompt() {
        let prompt = PicocompPrompt::new("picocom");
        assert_eq!(prompt.render_prompt_left(), "[picocom]$ ");
    }

    #[test]
    fn test_indicator_empty() {
        let prompt = PicocompPrompt::new("picocom");
        assert_eq!(prompt.render_prompt_indicator(PromptEditMode::Default), "");
        assert_eq!(prompt.render_prompt_right(), "");
    }
}
