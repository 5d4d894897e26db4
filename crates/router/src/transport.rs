use crate::error::{Result, RouterError};
use async_trait::async_trait;
use orgjump_protocol::{SessionContext, DEFAULT_API_VERSION};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Which query endpoint a SOQL statement is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryApi {
    /// `/services/data/{version}/query`
    Data,
    /// `/services/data/{version}/tooling/query`, for metadata objects such as flows.
    Tooling,
}

impl QueryApi {
    const fn path_segment(self) -> &'static str {
        match self {
            QueryApi::Data => "query",
            QueryApi::Tooling => "tooling/query",
        }
    }
}

impl fmt::Display for QueryApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryApi::Data => f.write_str("Query"),
            QueryApi::Tooling => f.write_str("Tooling Query"),
        }
    }
}

#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// Runs `soql` and returns the raw `records` array (empty when absent).
    async fn query(
        &self,
        session: &SessionContext,
        api: QueryApi,
        soql: &str,
    ) -> Result<Vec<Value>>;
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    records: Vec<Value>,
}

/// reqwest-backed transport for the platform REST query endpoints.
#[derive(Debug, Clone)]
pub struct RestTransport {
    client: Client,
    api_version: String,
    base_override: Option<String>,
}

impl RestTransport {
    pub fn new(api_version: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("orgjump/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_version: api_version.into(),
            base_override: None,
        })
    }

    /// Sends every request to `base` instead of the session origin, e.g. a
    /// local proxy. The session token is still attached.
    #[must_use]
    pub fn with_base_override(mut self, base: Option<String>) -> Self {
        self.base_override = base.filter(|b| !b.trim().is_empty());
        self
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn endpoint(&self, origin: &str, api: QueryApi) -> String {
        let base = self.base_override.as_deref().unwrap_or(origin);
        format!(
            "{}/services/data/{}/{}",
            base.trim_end_matches('/'),
            self.api_version,
            api.path_segment()
        )
    }
}

impl Default for RestTransport {
    fn default() -> Self {
        Self {
            client: Client::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            base_override: None,
        }
    }
}

#[async_trait]
impl QueryTransport for RestTransport {
    async fn query(
        &self,
        session: &SessionContext,
        api: QueryApi,
        soql: &str,
    ) -> Result<Vec<Value>> {
        let url = format!(
            "{}?q={}",
            self.endpoint(&session.origin, api),
            urlencoding::encode(soql)
        );
        log::debug!("{api} -> {}", self.endpoint(&session.origin, api));

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, session.authorization_header())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string());
            log::warn!("{api} returned HTTP {}", status.as_u16());
            return Err(RouterError::QueryFailed {
                api,
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.bytes().await?;
        let parsed: QueryResponse = serde_json::from_slice(&body)?;
        Ok(parsed.records)
    }
}
