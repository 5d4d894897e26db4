use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod target;

pub use target::join_target;

/// Hard cap on the number of records a lookup may return.
pub const RESULT_LIMIT: usize = 5;

/// Platform REST API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "v58.0";

/// Cookie that carries the platform session id.
pub const DEFAULT_SESSION_COOKIE: &str = "sid";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Flow,
    User,
    Profile,
    Object,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 4] = [
        CategoryKind::Flow,
        CategoryKind::User,
        CategoryKind::Profile,
        CategoryKind::Object,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CategoryKind::Flow => "Flow",
            CategoryKind::User => "User",
            CategoryKind::Profile => "Profile",
            CategoryKind::Object => "Object",
        }
    }

    pub fn breadcrumb(self) -> String {
        format!("{} >", self.as_str())
    }

    pub fn placeholder(self) -> String {
        format!("Type {} Name...", self.as_str())
    }

    /// Whether the lookup for this kind goes over the network.
    pub const fn requires_query(self) -> bool {
        !matches!(self, CategoryKind::Object)
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One navigable suggestion produced by a lookup strategy.
///
/// `target` is either a path relative to the org origin or an absolute
/// `http(s)` URL; use [`join_target`] to turn it into something openable.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub id: String,
    pub label: String,
    pub subtitle: String,
    pub target: String,
}

/// API origin plus the bearer token borrowed from the browser session.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub origin: String,
    bearer_token: String,
}

impl SessionContext {
    pub fn new(origin: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            bearer_token: bearer_token.into(),
        }
    }

    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.bearer_token)
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("origin", &self.origin)
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: &str, message: impl Into<String>, hint: Option<&str>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            hint: hint.map(str::to_string),
        }
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}
