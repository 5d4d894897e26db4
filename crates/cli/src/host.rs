use anyhow::{Context as AnyhowContext, Result};
use async_trait::async_trait;
use orgjump_session::{domain, CookieStore, MemoryCookieStore};
use std::collections::BTreeMap;
use std::path::Path;

/// The browser tab the popup was opened from.
#[async_trait]
pub trait TabHost: Send + Sync {
    async fn active_tab_url(&self) -> Result<String>;

    /// Opens `url` in a new tab.
    async fn open_tab(&self, url: &str) -> Result<()>;
}

/// Host for running outside a browser: the tab URL and cookies are supplied
/// up front and "opening a tab" prints the URL on stdout.
#[derive(Debug, Default)]
pub struct TerminalHost {
    tab_url: Option<String>,
    cookies: MemoryCookieStore,
}

impl TerminalHost {
    pub fn new(tab_url: Option<String>, cookies: MemoryCookieStore) -> Self {
        Self { tab_url, cookies }
    }

    /// Builds the host from a cookie jar file and/or a raw session id bound to
    /// the tab origin.
    pub fn from_sources(
        tab_url: Option<String>,
        cookie_jar: Option<&Path>,
        sid: Option<String>,
        cookie_name: &str,
    ) -> Result<Self> {
        let mut cookies = match cookie_jar {
            Some(path) => load_cookie_jar(path)?,
            None => MemoryCookieStore::new(),
        };
        if let Some(sid) = sid.filter(|value| !value.trim().is_empty()) {
            let tab = tab_url
                .as_deref()
                .context("--sid needs the tab URL (--tab-url or ORGJUMP_TAB_URL)")?;
            let origin = domain::https_origin(&domain::tab_host(tab)?);
            log::debug!("binding session id to {origin}");
            cookies.insert(&origin, cookie_name, sid);
        }
        Ok(Self::new(tab_url, cookies))
    }
}

#[async_trait]
impl TabHost for TerminalHost {
    async fn active_tab_url(&self) -> Result<String> {
        self.tab_url
            .clone()
            .context("No active tab URL; pass --tab-url or set ORGJUMP_TAB_URL")
    }

    async fn open_tab(&self, url: &str) -> Result<()> {
        crate::print_stdout(url)
    }
}

#[async_trait]
impl CookieStore for TerminalHost {
    async fn get(&self, origin: &str, name: &str) -> Option<String> {
        self.cookies.get(origin, name).await
    }
}

/// Reads `{"https://host": {"sid": "..."}}`.
pub fn load_cookie_jar(path: &Path) -> Result<MemoryCookieStore> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cookie jar {}", path.display()))?;
    let jar: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid cookie jar {}", path.display()))?;

    let mut cookies = MemoryCookieStore::new();
    for (origin, entries) in jar {
        for (name, value) in entries {
            cookies.insert(&origin, &name, value);
        }
    }
    log::debug!("loaded {} cookies from {}", cookies.len(), path.display());
    Ok(cookies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[tokio::test]
    async fn cookie_jar_is_keyed_by_origin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"https://acme.my.salesforce.com": {{"sid": "00Dabc"}}}}"#
        )
        .unwrap();
        let cookies = load_cookie_jar(file.path()).unwrap();
        assert_eq!(
            cookies.get("https://acme.my.salesforce.com", "sid").await,
            Some("00Dabc".to_string())
        );
        assert_eq!(cookies.get("https://other.my.salesforce.com", "sid").await, None);
    }

    #[test]
    fn malformed_jar_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_cookie_jar(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid cookie jar"));
    }

    #[tokio::test]
    async fn sid_is_bound_to_tab_origin() {
        let host = TerminalHost::from_sources(
            Some("https://acme.lightning.force.com/lightning/page/home".into()),
            None,
            Some("00Dsid".into()),
            "sid",
        )
        .unwrap();
        assert_eq!(
            host.get("https://acme.lightning.force.com", "sid").await,
            Some("00Dsid".to_string())
        );
        assert_eq!(
            host.active_tab_url().await.unwrap(),
            "https://acme.lightning.force.com/lightning/page/home"
        );
    }

    #[tokio::test]
    async fn missing_tab_url_is_reported() {
        let host = TerminalHost::default();
        let err = host.active_tab_url().await.unwrap_err();
        assert!(err.to_string().contains("--tab-url"));
        assert!(TerminalHost::from_sources(None, None, Some("x".into()), "sid").is_err());
    }
}
