//! Direct navigation: a fixed phrase table, an `obj <Name>` shortcut and a
//! Setup search fallback.

mod table;

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Literal prefix that turns the remainder of a phrase into an object API name.
pub const OBJECT_PREFIX: &str = "obj ";

const SETUP_SEARCH_PATH: &str = "/lightning/setup/SetupOneHome/home?setupid=Search&searchVal=";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Alias phrase is empty")]
    EmptyPhrase,

    #[error("Alias '{0}' shadows a built-in entry")]
    ShadowsBuiltin(String),

    #[error("Alias '{phrase}' must map to a path starting with '/' or an http(s) URL, got '{path}'")]
    InvalidPath { phrase: String, path: String },
}

/// Which matcher produced a [`NavTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavMatch {
    Table,
    Object,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavTarget {
    pub path: String,
    pub matched: NavMatch,
}

/// Setup search for `raw`, URL-encoded.
pub fn setup_search_path(raw: &str) -> String {
    format!("{SETUP_SEARCH_PATH}{}", urlencoding::encode(raw))
}

pub fn object_manager_path(api_name: &str) -> String {
    format!("/lightning/setup/ObjectManager/{api_name}/Details/view")
}

fn normalize_phrase(phrase: &str) -> String {
    phrase.trim().to_lowercase()
}

fn object_name(phrase: &str) -> Option<&str> {
    let head = phrase.get(..OBJECT_PREFIX.len())?;
    if !head.eq_ignore_ascii_case(OBJECT_PREFIX) {
        return None;
    }
    let name = phrase[OBJECT_PREFIX.len()..].trim();
    (!name.is_empty()).then_some(name)
}

#[derive(Debug, Clone)]
pub struct NavigationTable {
    entries: BTreeMap<String, String>,
}

impl Default for NavigationTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl NavigationTable {
    pub fn builtin() -> Self {
        let entries = table::BUILTIN_ROUTES
            .iter()
            .map(|(phrase, path)| ((*phrase).to_string(), (*path).to_string()))
            .collect();
        Self { entries }
    }

    /// Built-in table extended with operator aliases. Aliases may add phrases
    /// but never replace a built-in one.
    pub fn with_aliases<'a, I>(aliases: I) -> Result<Self, NavigationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::builtin();
        for (phrase, path) in aliases {
            let key = normalize_phrase(phrase);
            if key.is_empty() {
                return Err(NavigationError::EmptyPhrase);
            }
            if table::BUILTIN_ROUTES.iter().any(|(p, _)| *p == key) {
                return Err(NavigationError::ShadowsBuiltin(key));
            }
            let path = path.trim();
            let valid = path.starts_with('/')
                || path.starts_with("https://")
                || path.starts_with("http://");
            if !valid {
                return Err(NavigationError::InvalidPath {
                    phrase: key,
                    path: path.to_string(),
                });
            }
            table.entries.insert(key, path.to_string());
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Exact table match, then the `obj ` shortcut, then Setup search.
    pub fn lookup(&self, phrase: &str) -> NavTarget {
        let trimmed = phrase.trim();

        if let Some(path) = self.entries.get(&normalize_phrase(trimmed)) {
            return NavTarget {
                path: path.clone(),
                matched: NavMatch::Table,
            };
        }

        if let Some(name) = object_name(trimmed) {
            return NavTarget {
                path: object_manager_path(name),
                matched: NavMatch::Object,
            };
        }

        log::debug!("no navigation entry for '{trimmed}', falling back to setup search");
        NavTarget {
            path: setup_search_path(trimmed),
            matched: NavMatch::Search,
        }
    }
}
