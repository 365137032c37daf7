//! Application state and core logic

use crate::config::FormsConfig;
use crate::state::{AppState, Focus, FormKind, SubmitOutcome};
use crate::submit::{SimulatedSubmitClient, SubmitClientTrait, SubmitError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Result of a spawned submit, delivered back to the UI loop
#[derive(Debug)]
pub struct SubmitCompletion {
    pub attempt: u64,
    pub result: Result<(), SubmitError>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Where valid submissions are sent
    client: Arc<dyn SubmitClientTrait>,
    completions_tx: mpsc::UnboundedSender<SubmitCompletion>,
    completions_rx: mpsc::UnboundedReceiver<SubmitCompletion>,
    /// Task running the in-flight submit, if any
    pending: Option<JoinHandle<()>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App backed by the simulated submit client
    pub fn new(config: &FormsConfig) -> Self {
        let client = Arc::new(SimulatedSubmitClient::from_config(config));
        Self::with_client(config, client)
    }

    pub fn with_client(config: &FormsConfig, client: Arc<dyn SubmitClientTrait>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(config.initial_form, config.validation_mode),
            client,
            completions_tx,
            completions_rx,
            pending: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Char('r') if ctrl => self.reset_form(),
            KeyCode::Char('u') if ctrl => self.state.screen.clear_field(),
            KeyCode::Esc => {
                if self.state.screen.engine.is_submitting() {
                    self.cancel_submit();
                } else {
                    self.quit = true;
                }
            }
            KeyCode::F(2) => self.show_form(self.state.screen.kind.next()),
            KeyCode::Tab | KeyCode::Down => self.state.screen.next_row(),
            KeyCode::BackTab | KeyCode::Up => self.state.screen.prev_row(),
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => self.state.screen.pop_char(),
            KeyCode::Char(c) if !ctrl => self.state.screen.push_char(c),
            _ => {}
        }
    }

    /// Validate the current form and, if valid, hand it to the submit client
    /// on a background task. A submit already in flight makes this a no-op.
    pub fn submit(&mut self) {
        let ticket = match self.state.screen.engine.begin_submit() {
            Ok(ticket) => ticket,
            Err(outcome) => {
                self.apply_outcome(outcome);
                return;
            }
        };

        self.state.status_message = Some("Submitting...".to_string());
        let client = Arc::clone(&self.client);
        let tx = self.completions_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            let result = client.submit(ticket.form, ticket.values).await;
            // Receiver only goes away on shutdown
            let _ = tx.send(SubmitCompletion {
                attempt: ticket.attempt,
                result,
            });
        }));
    }

    /// Apply any submit results that have arrived since the last tick
    pub fn poll_submissions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply_completion(completion);
        }
    }

    fn apply_completion(&mut self, completion: SubmitCompletion) {
        let finished = self
            .state
            .screen
            .engine
            .finish_submit(completion.attempt, completion.result);
        if let Some(outcome) = finished {
            self.pending = None;
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: SubmitOutcome) {
        let message = match outcome {
            SubmitOutcome::Submitted => format!("{} submitted", self.state.screen.kind.title()),
            SubmitOutcome::Invalid(errors) => {
                format!("Fix {} field(s) before submitting", errors.len())
            }
            SubmitOutcome::Rejected(SubmitError::Field { message, .. })
            | SubmitOutcome::Rejected(SubmitError::Form(message)) => {
                format!("Submit failed: {message}")
            }
            SubmitOutcome::Busy => return,
        };
        self.state.status_message = Some(message);
    }

    /// Abandon the in-flight submit
    fn cancel_submit(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        if self.state.screen.engine.cancel_submit() {
            self.state.status_message = Some("Submit cancelled".to_string());
        }
    }

    /// Discard the current form and present a fresh `kind`
    pub fn show_form(&mut self, kind: FormKind) {
        self.cancel_submit();
        self.state.show_form(kind);
        tracing::debug!("Showing form {}", kind.id());
    }

    fn reset_form(&mut self) {
        self.cancel_submit();
        self.state.screen.engine.reset();
        self.state.screen.active_row_index = 0;
        self.state.status_message = None;
    }

    /// Wait for the next submit result and apply it
    #[cfg(test)]
    async fn next_completion(&mut self) {
        if let Some(completion) = self.completions_rx.recv().await {
            self.apply_completion(completion);
        }
    }
}
