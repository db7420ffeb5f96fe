//! Error types shared by the API client, session store and forms.

use thiserror::Error;

/// Client-side validation failures. These are caught before any request is
/// dispatched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Passwords don't match!")]
    PasswordMismatch,

    #[error("Password must be at least {min} characters!")]
    PasswordTooShort { min: usize },

    #[error("Story must be {max} characters or less!")]
    StoryTooLong { max: usize },
}

/// Errors raised by the client. Every variant carries owned strings so the
/// error can travel through [`crate::event::AppEvent`].
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },

    /// A success body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Persisted client state could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {message}"),
        None => String::new(),
    }
}

impl ClientError {
    pub fn status(status: u16, message: Option<String>) -> Self {
        Self::Status { status, message }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The server-supplied message, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text shown to the user: the server's message when present, else the
    /// per-operation fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            _ => self
                .server_message()
                .filter(|message| !message.trim().is_empty())
                .unwrap_or(fallback)
                .to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
