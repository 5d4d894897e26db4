use super::interpreter::{Interpreter, LookupRequest, PopupAction, PopupEvent, ROOT_PLACEHOLDER};
use super::sinks::PopupView;
use crate::host::TabHost;
use anyhow::Result;
use orgjump_navigation::setup_search_path;
use orgjump_protocol::{join_target, CategoryKind};
use orgjump_router::{QueryRouter, QueryTransport, RouteOutcome, SearchTerm};
use orgjump_session::{tab_origin, CookieStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{self, Instant};

pub const STATUS_READY: &str = "Ready to search.";
pub const STATUS_SEARCHING: &str = "Searching...";

/// How a popup session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupExit {
    Teleported(String),
    /// The event source closed without a teleport.
    Closed,
}

struct FetchDone {
    generation: u64,
    open_top: bool,
    result: Result<RouteOutcome>,
}

/// Runs one popup session: feeds events to the [`Interpreter`], fires due
/// lookups and applies their results to the view.
pub struct PopupDriver<T, H> {
    router: Arc<QueryRouter<T>>,
    host: Arc<H>,
    interpreter: Interpreter,
    fetches: JoinSet<FetchDone>,
    /// Generation of the newest lookup still showing "Searching...".
    searching: Option<u64>,
    shown: Option<RouteOutcome>,
}

impl<T, H> PopupDriver<T, H>
where
    T: QueryTransport + 'static,
    H: TabHost + CookieStore + 'static,
{
    pub fn new(router: Arc<QueryRouter<T>>, host: Arc<H>, debounce: Duration) -> Self {
        Self {
            router,
            host,
            interpreter: Interpreter::new(debounce),
            fetches: JoinSet::new(),
            searching: None,
            shown: None,
        }
    }

    pub async fn run<V: PopupView>(
        mut self,
        mut events: mpsc::Receiver<PopupEvent>,
        view: &mut V,
    ) -> Result<PopupExit> {
        view.prompt(None, ROOT_PLACEHOLDER);
        let mut input_open = true;

        loop {
            // Lookups already issued still land after the input closes.
            if !input_open && self.fetches.is_empty() {
                return Ok(PopupExit::Closed);
            }
            let next_deadline = if input_open {
                self.interpreter.next_deadline()
            } else {
                None
            };

            tokio::select! {
                event = events.recv(), if input_open => {
                    let Some(event) = event else {
                        input_open = false;
                        continue;
                    };
                    if let Some(url) = self.on_event(event, view).await {
                        return Ok(PopupExit::Teleported(url));
                    }
                }
                () = async {
                    if let Some(deadline) = next_deadline {
                        time::sleep_until(deadline).await;
                    }
                }, if next_deadline.is_some() => {
                    if let Some(request) = self.interpreter.poll_due(Instant::now()) {
                        self.spawn_lookup(request, view);
                    }
                }
                Some(joined) = self.fetches.join_next(), if !self.fetches.is_empty() => {
                    match joined {
                        Ok(done) => {
                            if let Some(url) = self.on_fetch(done, view).await {
                                return Ok(PopupExit::Teleported(url));
                            }
                        }
                        Err(err) => log::warn!("lookup task failed: {err}"),
                    }
                }
            }
        }
    }

    async fn on_event<V: PopupView>(
        &mut self,
        event: PopupEvent,
        view: &mut V,
    ) -> Option<String> {
        match self.interpreter.handle(event, Instant::now()) {
            PopupAction::None | PopupAction::Scheduled(_) => None,
            PopupAction::Cancelled => {
                if self.searching.take().is_some() {
                    view.status("");
                }
                None
            }
            PopupAction::EnterCategory(kind) => {
                self.enter_category(kind, view);
                None
            }
            PopupAction::SetupSearch(text) => {
                let origin = match self.current_origin().await {
                    Ok(origin) => origin,
                    Err(err) => {
                        view.status(&format!("Error: {err}"));
                        return None;
                    }
                };
                let url = join_target(&origin, &setup_search_path(&text));
                self.teleport(url, view).await
            }
            PopupAction::Lookup(request) => {
                self.spawn_lookup(request, view);
                None
            }
            PopupAction::ResetToRoot => {
                self.shown = None;
                self.searching = None;
                view.clear();
                view.prompt(None, ROOT_PLACEHOLDER);
                view.status("");
                None
            }
            PopupAction::Activate(index) => {
                let url = self.shown.as_ref().and_then(|outcome| {
                    outcome
                        .records
                        .get(index)
                        .map(|record| join_target(&outcome.origin, &record.target))
                });
                match url {
                    Some(url) => self.teleport(url, view).await,
                    None => {
                        log::debug!("no suggestion at index {index}");
                        None
                    }
                }
            }
        }
    }

    fn enter_category<V: PopupView>(&mut self, kind: CategoryKind, view: &mut V) {
        self.shown = None;
        self.searching = None;
        view.clear();
        view.prompt(Some(&kind.breadcrumb()), &kind.placeholder());
        view.status(STATUS_READY);
    }

    fn spawn_lookup<V: PopupView>(&mut self, request: LookupRequest, view: &mut V) {
        let LookupRequest {
            generation,
            kind,
            term,
            open_top,
        } = request;
        log::debug!("{kind} lookup for '{term}' (generation {generation})");
        view.status(STATUS_SEARCHING);
        self.searching = Some(generation);

        let router = Arc::clone(&self.router);
        let host = Arc::clone(&self.host);
        self.fetches.spawn(async move {
            FetchDone {
                generation,
                open_top,
                result: lookup(router, host, kind, term).await,
            }
        });
    }

    async fn on_fetch<V: PopupView>(
        &mut self,
        done: FetchDone,
        view: &mut V,
    ) -> Option<String> {
        if !self.interpreter.accepts(done.generation) {
            log::debug!("dropping stale lookup (generation {})", done.generation);
            // Nothing current is running any more.
            if self
                .searching
                .is_some_and(|generation| !self.interpreter.accepts(generation))
            {
                self.searching = None;
                view.status("");
            }
            return None;
        }
        if self.searching == Some(done.generation) {
            self.searching = None;
        }

        let outcome = match done.result {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("lookup failed: {err:#}");
                view.status(&format!("Error: {err}"));
                return None;
            }
        };

        view.render(&outcome.records);
        view.status("");
        let top = if done.open_top {
            outcome
                .top()
                .map(|record| join_target(&outcome.origin, &record.target))
        } else {
            None
        };
        self.shown = Some(outcome);

        match top {
            Some(url) => self.teleport(url, view).await,
            None => None,
        }
    }

    async fn current_origin(&self) -> Result<String> {
        let tab_url = self.host.active_tab_url().await?;
        Ok(tab_origin(&tab_url)?)
    }

    /// Opens `url`; a failed open is reported and the popup stays up.
    async fn teleport<V: PopupView>(&mut self, url: String, view: &mut V) -> Option<String> {
        log::info!("opening {url}");
        if let Err(err) = self.host.open_tab(&url).await {
            log::warn!("failed to open {url}: {err:#}");
            view.status(&format!("Error: {err}"));
            return None;
        }
        self.interpreter.reset();
        Some(url)
    }
}

async fn lookup<T, H>(
    router: Arc<QueryRouter<T>>,
    host: Arc<H>,
    kind: CategoryKind,
    term: SearchTerm,
) -> Result<RouteOutcome>
where
    T: QueryTransport,
    H: TabHost + CookieStore,
{
    let tab_url = host.active_tab_url().await?;
    Ok(router.route(&tab_url, host.as_ref(), kind, &term).await?)
}
