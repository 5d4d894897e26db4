use async_trait::async_trait;
use std::collections::HashMap;

/// Read access to the browser's cookie store.
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Value of cookie `name` scoped to `origin`, if the browser has one.
    async fn get(&self, origin: &str, name: &str) -> Option<String>;
}

/// Cookie store backed by a plain map, keyed by normalized origin.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieStore {
    cookies: HashMap<(String, String), String>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, origin: &str, name: &str, value: impl Into<String>) {
        self.cookies
            .insert((normalize_origin(origin), name.to_string()), value.into());
    }

    #[must_use]
    pub fn with(mut self, origin: &str, name: &str, value: impl Into<String>) -> Self {
        self.insert(origin, name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

#[async_trait]
impl CookieStore for MemoryCookieStore {
    async fn get(&self, origin: &str, name: &str) -> Option<String> {
        self.cookies
            .get(&(normalize_origin(origin), name.to_string()))
            .cloned()
    }
}

fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_ascii_lowercase()
}
