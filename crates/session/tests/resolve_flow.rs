use async_trait::async_trait;
use orgjump_session::{CookieStore, MemoryCookieStore, SessionError, SessionResolver};
use pretty_assertions::assert_eq;
use std::sync::Mutex;

struct RecordingStore {
    inner: MemoryCookieStore,
    reads: Mutex<Vec<String>>,
}

impl RecordingStore {
    fn new(inner: MemoryCookieStore) -> Self {
        Self {
            inner,
            reads: Mutex::new(Vec::new()),
        }
    }

    fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl CookieStore for RecordingStore {
    async fn get(&self, origin: &str, name: &str) -> Option<String> {
        self.reads.lock().unwrap().push(format!("{origin}#{name}"));
        self.inner.get(origin, name).await
    }
}

#[tokio::test]
async fn same_origin_cookie_skips_secondary_read() {
    let store = RecordingStore::new(
        MemoryCookieStore::new()
            .with("https://acme.lightning.force.com", "sid", "tab-token")
            .with("https://acme.my.salesforce.com", "sid", "api-token"),
    );
    let ctx = SessionResolver::default()
        .resolve("https://acme.lightning.force.com/lightning/setup/Flows/home", &store)
        .await
        .unwrap();

    assert_eq!(ctx.origin, "https://acme.lightning.force.com");
    assert_eq!(ctx.bearer_token(), "tab-token");
    assert_eq!(store.reads(), vec!["https://acme.lightning.force.com#sid"]);
}

#[tokio::test]
async fn falls_back_to_rewritten_api_origin() {
    let store = RecordingStore::new(
        MemoryCookieStore::new().with("https://foo.sandbox.my.salesforce.com", "sid", "sbx"),
    );
    let ctx = SessionResolver::default()
        .resolve("https://foo--c.sandbox.lightning.force.com/one/one.app", &store)
        .await
        .unwrap();

    assert_eq!(ctx.origin, "https://foo.sandbox.my.salesforce.com");
    assert_eq!(ctx.bearer_token(), "sbx");
    assert_eq!(
        store.reads(),
        vec![
            "https://foo--c.sandbox.lightning.force.com#sid",
            "https://foo.sandbox.my.salesforce.com#sid",
        ]
    );
}

#[tokio::test]
async fn missing_cookie_names_both_origins() {
    let store = RecordingStore::new(MemoryCookieStore::new());
    let err = SessionResolver::default()
        .resolve("https://acme.lightning.force.com/", &store)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SessionError::NoSessionFound {
            attempted: vec![
                "https://acme.lightning.force.com".to_string(),
                "https://acme.my.salesforce.com".to_string(),
            ]
        }
    );
    let message = err.to_string();
    assert!(message.contains("https://acme.lightning.force.com"));
    assert!(message.contains("https://acme.my.salesforce.com"));
}

#[tokio::test]
async fn api_host_is_not_read_twice() {
    let store = RecordingStore::new(MemoryCookieStore::new());
    let err = SessionResolver::default()
        .resolve("https://acme.my.salesforce.com/home", &store)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SessionError::NoSessionFound {
            attempted: vec!["https://acme.my.salesforce.com".to_string()]
        }
    );
    assert_eq!(store.reads().len(), 1);
}

#[tokio::test]
async fn rejects_foreign_hosts_before_reading_cookies() {
    let store = RecordingStore::new(MemoryCookieStore::new());
    let err = SessionResolver::default()
        .resolve("https://news.example.com/", &store)
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::NotOnPlatform { .. }));
    assert!(store.reads().is_empty());
}

#[tokio::test]
async fn custom_cookie_name_and_blank_values() {
    let store = MemoryCookieStore::new()
        .with("https://acme.my.salesforce.com", "sid", "   ")
        .with("https://acme.my.salesforce.com", "sid_Client", "real");
    let resolver = SessionResolver::new("sid_Client");
    let ctx = resolver
        .resolve("https://acme.my.salesforce.com/", &store)
        .await
        .unwrap();
    assert_eq!(ctx.bearer_token(), "real");

    let err = SessionResolver::default()
        .resolve("https://acme.my.salesforce.com/", &store)
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::NoSessionFound { .. }));
}
