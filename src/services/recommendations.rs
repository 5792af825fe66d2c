use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::{
    models::{Lookup, LookupKey, MovieRecord},
    services::providers::MetadataProvider,
};

/// Fetches every default title concurrently and keeps the ones that matched
///
/// Each title is looked up in its own task; a miss or failure for one title
/// never affects the others. Results come back in the order of `titles`,
/// restricted to successful matches. Nothing here is surfaced to the user:
/// individual failures are logged and dropped, and a batch where every lookup
/// failed is logged as an error and yields an empty list.
pub async fn load_recommendations(
    provider: Arc<dyn MetadataProvider>,
    titles: &[String],
) -> Vec<MovieRecord> {
    let mut tasks = Vec::with_capacity(titles.len());

    for title in titles {
        let provider = provider.clone();
        let key = LookupKey::Title(title.clone());
        let task = tokio::spawn(async move { provider.lookup(&key).await });
        tasks.push((title, task));
    }

    let mut records = Vec::new();
    let mut misses = 0usize;
    let mut failures = 0usize;

    for (title, task) in tasks {
        match task.await {
            Ok(Ok(Lookup::Found(record))) => records.push(record),
            Ok(Ok(Lookup::Missing { reason })) => {
                tracing::debug!(title = %title, reason = %reason, "Recommended title not found");
                misses += 1;
            }
            Ok(Err(e)) => {
                tracing::warn!(title = %title, error = %e, "Recommended title lookup failed");
                failures += 1;
            }
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Recommendation task join error");
                failures += 1;
            }
        }
    }

    if !titles.is_empty() && failures == titles.len() {
        tracing::error!(
            requested = titles.len(),
            provider = provider.name(),
            "Error loading recommended movies: every lookup failed"
        );
        return Vec::new();
    }

    tracing::info!(
        requested = titles.len(),
        loaded = records.len(),
        misses,
        failures,
        "Recommendations loaded"
    );

    records
}

/// The recommendation set, populated at most once per process
#[derive(Debug, Default)]
pub struct Recommendations {
    cell: OnceCell<Vec<MovieRecord>>,
}

impl Recommendations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the loader the first time it is called; later calls return the
    /// already-published set without issuing requests.
    pub async fn load_once(
        &self,
        provider: Arc<dyn MetadataProvider>,
        titles: &[String],
    ) -> &[MovieRecord] {
        self.cell
            .get_or_init(|| load_recommendations(provider, titles))
            .await
    }

    /// Published set, or empty while loading
    pub fn get(&self) -> &[MovieRecord] {
        self.cell.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
