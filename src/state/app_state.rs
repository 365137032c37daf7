//! Application state definitions

use super::forms::{FormEngine, FormKind, ValidationMode};

/// Focus movement over a screen's rows
pub trait Focus {
    fn row_count(&self) -> usize;
    fn active_row(&self) -> usize;
    fn set_active_row(&mut self, index: usize);
    fn next_row(&mut self) {
        let count = self.row_count();
        let current = self.active_row();
        self.set_active_row((current + 1) % count);
    }
    fn prev_row(&mut self) {
        let count = self.row_count();
        let current = self.active_row();
        if current == 0 {
            self.set_active_row(count - 1);
        } else {
            self.set_active_row(current - 1);
        }
    }
}

/// The form currently on screen and which row has focus
#[derive(Debug, Clone)]
pub struct FormScreen {
    pub kind: FormKind,
    pub engine: FormEngine,
    /// One row per field, then the submit button
    pub active_row_index: usize,
}

impl FormScreen {
    pub fn new(kind: FormKind, mode: ValidationMode) -> Self {
        Self {
            kind,
            engine: kind.build(mode),
            active_row_index: 0,
        }
    }

    /// Returns true if the submit button row is currently active
    pub fn is_submit_row_active(&self) -> bool {
        self.active_row_index == self.engine.fields().len()
    }

    /// Name of the focused field, if a field row has focus
    pub fn active_field_name(&self) -> Option<&str> {
        self.engine
            .fields()
            .get(self.active_row_index)
            .map(|f| f.name.as_str())
    }

    /// Append a character to the focused field
    pub fn push_char(&mut self, c: char) {
        if let Some(name) = self.active_field_name().map(str::to_string) {
            let mut value = self.engine.state().value(&name).to_string();
            value.push(c);
            self.engine.set_field_value(&name, value);
        }
    }

    /// Remove the last character from the focused field
    pub fn pop_char(&mut self) {
        if let Some(name) = self.active_field_name().map(str::to_string) {
            let mut value = self.engine.state().value(&name).to_string();
            if value.pop().is_some() {
                self.engine.set_field_value(&name, value);
            }
        }
    }

    /// Clear the focused field
    pub fn clear_field(&mut self) {
        if let Some(name) = self.active_field_name().map(str::to_string) {
            self.engine.set_field_value(&name, String::new());
        }
    }
}

impl Focus for FormScreen {
    fn row_count(&self) -> usize {
        self.engine.fields().len() + 1
    }
    fn active_row(&self) -> usize {
        self.active_row_index
    }
    fn set_active_row(&mut self, index: usize) {
        self.active_row_index = index.min(self.engine.fields().len());
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: FormScreen,
    pub validation_mode: ValidationMode,
    /// Outcome of the last action, shown in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(kind: FormKind, validation_mode: ValidationMode) -> Self {
        Self {
            screen: FormScreen::new(kind, validation_mode),
            validation_mode,
            status_message: None,
        }
    }

    /// Replace the current form with a fresh instance of `kind`
    pub fn show_form(&mut self, kind: FormKind) {
        self.screen = FormScreen::new(kind, self.validation_mode);
        self.status_message = None;
    }
}
