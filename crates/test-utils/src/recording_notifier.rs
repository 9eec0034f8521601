use std::sync::{Arc, Mutex};

use cascade::errors::NotifyError;
use cascade::notify::{Notifier, NotifyFuture, StatusCode};

/// How the fake endpoint answers.
#[derive(Debug, Clone, Copy)]
pub enum NotifierMode {
    Respond(StatusCode),
    TransportError,
}

/// A notifier that records every message and answers with a fixed mode.
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
    mode: NotifierMode,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::with_mode(NotifierMode::Respond(StatusCode::OK))
    }

    pub fn with_mode(mode: NotifierMode) -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            mode,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for RecordingNotifier {
    fn send<'a>(&'a self, message: &'a str) -> NotifyFuture<'a> {
        Box::pin(async move {
            self.messages.lock().unwrap().push(message.to_string());
            match self.mode {
                NotifierMode::Respond(code) => Ok(code),
                NotifierMode::TransportError => {
                    Err(NotifyError::Transport("connection refused".to_string()))
                }
            }
        })
    }
}
