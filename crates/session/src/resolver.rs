use crate::cookies::CookieStore;
use crate::domain::{api_host_for, https_origin, is_platform_host, tab_host};
use crate::error::{Result, SessionError};
use orgjump_protocol::{SessionContext, DEFAULT_SESSION_COOKIE};

/// Finds an API-capable origin and bearer token for the active tab.
///
/// Nothing is cached; every call reads the cookie store again.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    cookie_name: String,
}

impl Default for SessionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

impl SessionResolver {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub async fn resolve(
        &self,
        tab_url: &str,
        cookies: &dyn CookieStore,
    ) -> Result<SessionContext> {
        let host = tab_host(tab_url)?;
        if !is_platform_host(&host) {
            return Err(SessionError::NotOnPlatform { host });
        }

        // A cookie on the tab origin ends the search.
        let tab_origin = https_origin(&host);
        if let Some(token) = self.read(cookies, &tab_origin).await {
            return Ok(SessionContext::new(tab_origin, token));
        }

        let mut attempted = vec![tab_origin.clone()];
        let api_origin = https_origin(&api_host_for(&host));
        if api_origin != tab_origin {
            if let Some(token) = self.read(cookies, &api_origin).await {
                return Ok(SessionContext::new(api_origin, token));
            }
            attempted.push(api_origin);
        }

        log::warn!("no session cookie '{}' for {}", self.cookie_name, attempted.join(", "));
        Err(SessionError::NoSessionFound { attempted })
    }

    async fn read(&self, cookies: &dyn CookieStore, origin: &str) -> Option<String> {
        let value = cookies
            .get(origin, &self.cookie_name)
            .await
            .filter(|value| !value.trim().is_empty());
        log::debug!(
            "cookie '{}' at {origin}: {}",
            self.cookie_name,
            if value.is_some() { "found" } else { "absent" }
        );
        value
    }
}
