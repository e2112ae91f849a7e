pub mod config;
pub mod constants;
pub mod env_file;
pub mod error;
pub mod llm_interaction;
pub mod presentation;
pub mod web_server;

/// A topic the user wants looked up, exactly as they typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Returns `None` for blank input. The text itself is kept verbatim,
    /// surrounding whitespace included.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Text the model produced for one question. Opaque; never validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer(String);

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
