use orgjump_navigation::NavigationError;
use orgjump_protocol::ErrorEnvelope;
use orgjump_router::RouterError;
use orgjump_session::SessionError;
use serde::Serialize;

const HINT_NOT_ON_PLATFORM: &str =
    "Pass the URL of an open Salesforce tab (lightning.force.com or my.salesforce.com).";
const HINT_NO_SESSION: &str = "Log in to the org in the browser tab and retry.";
const HINT_QUERY_FAILED: &str =
    "The session may have expired or lack API access; refresh the tab and retry.";
const HINT_TRANSPORT: &str = "Check network connectivity to the org.";

/// JSON body printed on stdout when a `--json` command fails.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorReport {
    pub status: &'static str,
    pub error: ErrorEnvelope,
}

impl ErrorReport {
    pub(crate) fn from_error(err: &anyhow::Error) -> Self {
        Self {
            status: "error",
            error: classify(err),
        }
    }
}

fn session_envelope(err: &SessionError) -> ErrorEnvelope {
    match err {
        SessionError::InvalidTabUrl(_) | SessionError::NotOnPlatform { .. } => {
            ErrorEnvelope::new("not_on_platform", err.to_string(), Some(HINT_NOT_ON_PLATFORM))
        }
        SessionError::NoSessionFound { .. } => {
            ErrorEnvelope::new("no_session", err.to_string(), Some(HINT_NO_SESSION))
        }
    }
}

/// Maps a failure onto a stable error code plus a short operator hint.
pub(crate) fn classify(err: &anyhow::Error) -> ErrorEnvelope {
    for cause in err.chain() {
        if let Some(router) = cause.downcast_ref::<RouterError>() {
            return match router {
                RouterError::Session(session) => session_envelope(session),
                RouterError::QueryFailed { .. } | RouterError::Decode(_) => {
                    ErrorEnvelope::new("query_failed", router.to_string(), Some(HINT_QUERY_FAILED))
                }
                RouterError::Transport(_) => {
                    ErrorEnvelope::new("transport", router.to_string(), Some(HINT_TRANSPORT))
                }
            };
        }
        if let Some(session) = cause.downcast_ref::<SessionError>() {
            return session_envelope(session);
        }
        if let Some(nav) = cause.downcast_ref::<NavigationError>() {
            return ErrorEnvelope::new("invalid_input", nav.to_string(), None);
        }
    }
    ErrorEnvelope::new("internal", format!("{err:#}"), None)
}
