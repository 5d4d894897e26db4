use crate::transport::QueryApi;
use orgjump_session::SessionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RouterError>;

#[derive(Error, Debug)]
pub enum RouterError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("{api} Failed: {reason}")]
    QueryFailed {
        api: QueryApi,
        status: u16,
        reason: String,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed query response: {0}")]
    Decode(#[from] serde_json::Error),
}
