use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard,
};

use serde::Serialize;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    models::{Lookup, LookupKey, MovieRecord},
    services::providers::MetadataProvider,
};

/// Which entry point started a lookup cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    /// User-submitted search box
    Search,
    /// Click on a recommendation tile
    Recommendation,
}

/// Why a lookup cycle ended without a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The service answered but reported no match
    NotFound,
    /// Transport failure or a payload that failed validation
    FetchFailed,
}

/// Error shown in place of a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewError {
    pub kind: ErrorKind,
    pub source: LookupSource,
}

impl ViewError {
    /// User-facing message
    pub fn message(&self) -> &'static str {
        match (self.source, self.kind) {
            (LookupSource::Search, ErrorKind::NotFound) => "Not found any movie with this title",
            (LookupSource::Search, ErrorKind::FetchFailed) => "Error fetching movie data.",
            (LookupSource::Recommendation, ErrorKind::NotFound) => "Could not load movie details",
            (LookupSource::Recommendation, ErrorKind::FetchFailed) => {
                "Error fetching movie details."
            }
        }
    }
}

/// What the detail area currently shows
///
/// A record and an error can never be present together.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success(MovieRecord),
    Error(ViewError),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn record(&self) -> Option<&MovieRecord> {
        match self {
            ViewState::Success(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            ViewState::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Owns the search query and the detail view state
///
/// Every lookup is one cycle: publish `Loading`, issue a single request, then
/// publish `Success` or `Error`. Cycles are numbered; when a newer cycle has
/// started, an older one's outcome is discarded so a slow stale response can
/// never replace the result of the latest request.
pub struct SearchController {
    provider: Arc<dyn MetadataProvider>,
    query: Mutex<String>,
    view: watch::Sender<ViewState>,
    generation: AtomicU64,
}

impl SearchController {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        let (view, _) = watch::channel(ViewState::Idle);
        Self {
            provider,
            query: Mutex::new(String::new()),
            view,
            generation: AtomicU64::new(0),
        }
    }

    fn query_guard(&self) -> MutexGuard<'_, String> {
        self.query.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current contents of the search box
    pub fn query(&self) -> String {
        self.query_guard().clone()
    }

    /// Replaces the search box contents (one keystroke's worth of input)
    pub fn set_query(&self, query: impl Into<String>) {
        *self.query_guard() = query.into();
    }

    pub fn view_state(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// Observe every state transition, `Loading` included
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    /// Runs a title lookup for the current query
    pub async fn submit_search(self: &Arc<Self>) {
        let query = self.query();
        self.lookup_by_title(&query).await;
    }

    /// Looks up a title typed by the user
    ///
    /// A blank title changes nothing. Otherwise the query is cleared once the
    /// cycle settles, whatever the outcome.
    pub async fn lookup_by_title(self: &Arc<Self>, title: &str) {
        if title.trim().is_empty() {
            return;
        }

        let controller = self.clone();
        let key = LookupKey::Title(title.to_string());
        let cycle = tokio::spawn(async move {
            controller.run_cycle(key, LookupSource::Search).await;
            controller.query_guard().clear();
        });
        Self::settle(cycle).await;
    }

    /// Looks up a recommendation tile by its external identifier
    ///
    /// Leaves the query untouched.
    pub async fn lookup_by_id(self: &Arc<Self>, imdb_id: &str) {
        let controller = self.clone();
        let key = LookupKey::Id(imdb_id.to_string());
        let cycle = tokio::spawn(async move {
            controller
                .run_cycle(key, LookupSource::Recommendation)
                .await;
        });
        Self::settle(cycle).await;
    }

    /// Waits for a cycle running in its own task
    ///
    /// The cycle is detached from the caller: dropping this future (e.g. a
    /// disconnected HTTP client) still lets it publish its outcome.
    async fn settle(cycle: JoinHandle<()>) {
        if let Err(e) = cycle.await {
            tracing::error!(error = %e, "Lookup cycle task failed");
        }
    }

    async fn run_cycle(&self, key: LookupKey, source: LookupSource) {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.view.send_replace(ViewState::Loading);

        let outcome = match self.provider.lookup(&key).await {
            Ok(Lookup::Found(record)) => ViewState::Success(record),
            Ok(Lookup::Missing { reason }) => {
                tracing::info!(key = %key, reason = %reason, "No movie matched lookup");
                ViewState::Error(ViewError {
                    kind: ErrorKind::NotFound,
                    source,
                })
            }
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    error = %e,
                    provider = self.provider.name(),
                    "Movie lookup failed"
                );
                ViewState::Error(ViewError {
                    kind: ErrorKind::FetchFailed,
                    source,
                })
            }
        };

        if self.generation.load(Ordering::SeqCst) == ticket {
            self.view.send_replace(outcome);
        } else {
            tracing::debug!(key = %key, ticket, "Discarding superseded lookup result");
        }
    }
}
