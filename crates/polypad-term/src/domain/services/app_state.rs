use polypad_core::{descriptor, LanguageId, RunRequest};
use tui_textarea::TextArea;

use crate::domain::models::Action;

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

pub struct AppStateProps {
    pub language: LanguageId,
    pub interpreter_ready: bool,
}

/// UI session state. Owned and mutated by the event loop only.
pub struct AppState<'a> {
    pub language: LanguageId,
    pub editor: TextArea<'a>,
    pub output: String,
    pub running: bool,
    pub interpreter_ready: bool,
    pub scroll: u16,
    next_ticket: u64,
    current_ticket: Option<u64>,
}

impl<'a> AppState<'a> {
    pub fn new(props: AppStateProps) -> AppState<'a> {
        return AppState {
            language: props.language,
            editor: example_editor(props.language),
            output: String::new(),
            running: false,
            interpreter_ready: props.interpreter_ready,
            scroll: 0,
            next_ticket: 0,
            current_ticket: None,
        };
    }

    pub fn source_text(&self) -> String {
        return self.editor.lines().join("\n");
    }

    /// Replaces the source with the new language's example and clears the
    /// output. Both fields change together, never one without the other.
    pub fn select_language(&mut self, language: LanguageId) {
        self.language = language;
        self.editor = example_editor(language);
        self.output.clear();
        self.scroll = 0;
    }

    pub fn cycle_language(&mut self) {
        self.select_language(self.language.next());
    }

    /// Restores the example for the current language. Output is untouched.
    pub fn reset_source(&mut self) {
        self.editor = example_editor(self.language);
    }

    /// Empties the output pane. Source is untouched.
    pub fn clear_output(&mut self) {
        self.output.clear();
        self.scroll = 0;
    }

    /// Starts a run if none is in flight. Returns the action to hand to
    /// the worker; `None` means a run is already outstanding.
    pub fn begin_run(&mut self) -> Option<Action> {
        if self.running {
            return None;
        }

        self.running = true;
        self.next_ticket += 1;
        self.current_ticket = Some(self.next_ticket);
        self.output = "Running...\n".to_string();
        self.scroll = 0;

        return Some(Action::RunSnippet {
            ticket: self.next_ticket,
            request: RunRequest {
                language: self.language,
                source: self.source_text(),
            },
        });
    }

    /// Applies a finished run. The running flag clears unconditionally;
    /// the output is only written when the result is still current — same
    /// ticket, and the language selection has not moved on since the run
    /// was issued.
    pub fn finish_run(&mut self, ticket: u64, language: LanguageId, output: String) {
        self.running = false;

        let current = self.current_ticket.take();
        if current == Some(ticket) && language == self.language {
            self.output = output;
            self.scroll = 0;
        } else {
            log::debug!("discarding stale result for {language} (ticket {ticket})");
        }
    }

    /// One-way transition; there is no un-ready in normal operation.
    pub fn mark_interpreter_ready(&mut self) {
        self.interpreter_ready = true;
        if !self.running && self.output.is_empty() {
            self.output = "Python environment loaded successfully! Ready to run code.\n".to_string();
        }
    }

    pub fn status_text(&self) -> String {
        if self.language == LanguageId::Python {
            if self.interpreter_ready {
                return "Python ready".to_string();
            }
            return "Loading Python...".to_string();
        }
        return format!("{} runs remotely", descriptor(self.language).label);
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let scrolled = i32::from(self.scroll) + delta;
        self.scroll = scrolled.clamp(0, u16::MAX as i32) as u16;
    }
}

fn example_editor(language: LanguageId) -> TextArea<'static> {
    return TextArea::from(descriptor(language).example.lines());
}
