use super::commands::{parse_root_command, RootCommand};
use super::debounce::SuggestDebounce;
use orgjump_protocol::CategoryKind;
use orgjump_router::SearchTerm;
use std::time::Duration;
use tokio::time::Instant;

pub const ROOT_PLACEHOLDER: &str = "Type 'Flows', 'Users', 'Profiles'...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Root,
    Category(CategoryKind),
}

/// Input from whatever surface hosts the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupEvent {
    /// The input value changed.
    Input(String),
    Enter(String),
    Backspace { input_empty: bool },
    /// A rendered suggestion was clicked (0-based).
    Activate(usize),
}

/// A lookup the driver should run, tagged with the generation that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub generation: u64,
    pub kind: CategoryKind,
    pub term: SearchTerm,
    /// Teleport to the top record once results arrive.
    pub open_top: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupAction {
    None,
    EnterCategory(CategoryKind),
    /// Generic platform search for the trimmed root input.
    SetupSearch(String),
    Scheduled(Instant),
    Cancelled,
    Lookup(LookupRequest),
    ResetToRoot,
    Activate(usize),
}

/// Owned popup state machine. Consumes events, yields actions, performs no I/O.
#[derive(Debug)]
pub struct Interpreter {
    mode: Mode,
    pending_query: String,
    debounce: SuggestDebounce,
}

impl Interpreter {
    pub fn new(debounce: Duration) -> Self {
        Self {
            mode: Mode::Root,
            pending_query: String::new(),
            debounce: SuggestDebounce::new(debounce),
        }
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pending_query(&self) -> &str {
        &self.pending_query
    }

    pub fn handle(&mut self, event: PopupEvent, now: Instant) -> PopupAction {
        match (self.mode, event) {
            (_, PopupEvent::Activate(index)) => PopupAction::Activate(index),
            (Mode::Root, PopupEvent::Input(text)) => {
                self.pending_query = text;
                PopupAction::None
            }
            (Mode::Root, PopupEvent::Enter(text)) => match parse_root_command(&text) {
                RootCommand::Empty => PopupAction::None,
                RootCommand::Category(kind) => {
                    self.mode = Mode::Category(kind);
                    self.pending_query.clear();
                    self.debounce.invalidate();
                    PopupAction::EnterCategory(kind)
                }
                RootCommand::Search(text) => PopupAction::SetupSearch(text),
            },
            (Mode::Root, PopupEvent::Backspace { .. }) => PopupAction::None,
            (Mode::Category(_), PopupEvent::Input(text)) => {
                let term = SearchTerm::parse(&text);
                self.pending_query = text;
                match self.debounce.record(term, now) {
                    Some(deadline) => PopupAction::Scheduled(deadline),
                    None => PopupAction::Cancelled,
                }
            }
            (Mode::Category(kind), PopupEvent::Enter(text)) => {
                let Some(term) = SearchTerm::parse(&text) else {
                    return PopupAction::None;
                };
                self.pending_query = text;
                let generation = self.debounce.invalidate();
                PopupAction::Lookup(LookupRequest {
                    generation,
                    kind,
                    term,
                    open_top: true,
                })
            }
            (Mode::Category(_), PopupEvent::Backspace { input_empty }) => {
                if input_empty {
                    self.reset();
                    PopupAction::ResetToRoot
                } else {
                    PopupAction::None
                }
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.next_deadline()
    }

    /// Returns the debounced suggestion lookup once its quiet period is over.
    pub fn poll_due(&mut self, now: Instant) -> Option<LookupRequest> {
        let Mode::Category(kind) = self.mode else {
            return None;
        };
        self.debounce
            .take_due(now)
            .map(|(generation, term)| LookupRequest {
                generation,
                kind,
                term,
                open_top: false,
            })
    }

    /// Whether results tagged with `generation` may still be shown.
    pub const fn accepts(&self, generation: u64) -> bool {
        self.debounce.is_current(generation)
    }

    pub fn reset(&mut self) {
        self.mode = Mode::Root;
        self.pending_query.clear();
        self.debounce.invalidate();
    }
}
