use anyhow::{Context as AnyhowContext, Result};
use orgjump_navigation::NavigationTable;
use orgjump_protocol::{DEFAULT_API_VERSION, DEFAULT_SESSION_COOKIE, RESULT_LIMIT};
use orgjump_router::{QueryRouter, RestTransport};
use orgjump_session::SessionResolver;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// REST API version segment, e.g. `v58.0`.
    pub api_version: String,
    /// Quiet period after the last keystroke before suggestions are fetched.
    pub debounce_ms: u64,
    /// Maximum suggestions per lookup (1..=5).
    pub result_limit: usize,
    /// Name of the session cookie holding the bearer token.
    pub session_cookie: String,
    pub request_timeout_secs: u64,
    /// Send API requests here instead of the resolved org origin.
    pub api_base: Option<String>,
    /// Extra navigation phrases: `phrase = "/lightning/setup/..."`.
    pub aliases: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            debounce_ms: 300,
            result_limit: RESULT_LIMIT,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            request_timeout_secs: 15,
            api_base: None,
            aliases: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("orgjump").join("config.toml"))
    }

    /// Loads settings from `explicit`, or from the default location when it
    /// exists. An explicit path that cannot be read is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let settings = Self::parse(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(settings)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let settings: Self = toml::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.api_version.trim().is_empty() {
            anyhow::bail!("api_version must be non-empty");
        }
        if self.session_cookie.trim().is_empty() {
            anyhow::bail!("session_cookie must be non-empty");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be positive");
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn navigation_table(&self) -> Result<NavigationTable> {
        NavigationTable::with_aliases(
            self.aliases
                .iter()
                .map(|(phrase, path)| (phrase.as_str(), path.as_str())),
        )
        .context("Invalid navigation alias in config")
    }

    pub fn session_resolver(&self) -> SessionResolver {
        SessionResolver::new(self.session_cookie.clone())
    }

    pub fn build_router(&self) -> Result<QueryRouter> {
        let transport = RestTransport::new(self.api_version.clone(), self.request_timeout())
            .context("Failed to build HTTP client")?
            .with_base_override(self.api_base.clone());
        Ok(QueryRouter::new(self.session_resolver(), transport).with_limit(self.result_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_match_popup_behaviour() {
        let settings = Settings::default();
        assert_eq!(settings.api_version, "v58.0");
        assert_eq!(settings.debounce(), Duration::from_millis(300));
        assert_eq!(settings.result_limit, 5);
        assert_eq!(settings.session_cookie, "sid");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = Settings::parse(
            r#"
            debounce_ms = 150

            [aliases]
            perms = "/lightning/setup/PermSets/home"
            "#,
        )
        .unwrap();
        assert_eq!(settings.debounce_ms, 150);
        assert_eq!(settings.api_version, "v58.0");
        let table = settings.navigation_table().unwrap();
        assert_eq!(table.lookup("perms").path, "/lightning/setup/PermSets/home");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Settings::parse("debounce = 10").unwrap_err();
        assert!(format!("{err:#}").contains("unknown field"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Settings::parse("session_cookie = \"\"").is_err());
        assert!(Settings::parse("request_timeout_secs = 0").is_err());
    }

    #[test]
    fn router_limit_is_clamped() {
        let settings = Settings {
            result_limit: 50,
            ..Settings::default()
        };
        assert_eq!(settings.build_router().unwrap().limit(), 5);
    }

    #[test]
    fn explicit_path_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_version = \"v61.0\"").unwrap();
        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.api_version, "v61.0");

        let missing = file.path().with_extension("missing");
        let err = Settings::load(Some(missing.as_path())).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
