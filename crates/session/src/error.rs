use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid tab URL: {0}")]
    InvalidTabUrl(String),

    #[error("Please run on a Salesforce page (tab host: {host}).")]
    NotOnPlatform { host: String },

    #[error("Session cookie not found at {}. Log in to the org in this tab.", .attempted.join(" OR "))]
    NoSessionFound { attempted: Vec<String> },
}
