use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::services::{providers::MetadataProvider, Recommendations, SearchController};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<SearchController>,
    pub recommendations: Arc<Recommendations>,
    pub provider: Arc<dyn MetadataProvider>,
    pub default_titles: Arc<Vec<String>>,
    /// Base of the outbound catalog link, e.g. `https://www.imdb.com/title`
    pub imdb_title_url: Arc<str>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        default_titles: Vec<String>,
        imdb_title_url: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            controller: Arc::new(SearchController::new(provider.clone())),
            recommendations: Arc::new(Recommendations::new()),
            provider,
            default_titles: Arc::new(default_titles),
            imdb_title_url: imdb_title_url.into(),
        }
    }

    /// Starts the one-time recommendation prefetch in the background
    pub fn spawn_recommendation_load(&self) -> JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            let loaded = state
                .recommendations
                .load_once(state.provider.clone(), &state.default_titles)
                .await;
            tracing::info!(count = loaded.len(), "Recommendation grid ready");
        })
    }
}
