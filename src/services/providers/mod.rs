/// Movie metadata provider abstraction
///
/// The controller and the recommendation loader only talk to a provider through
/// this trait, so the HTTP-backed OMDb client can be swapped for a fake in tests.
use crate::{
    error::AppResult,
    models::{Lookup, LookupKey},
};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for movie metadata providers
///
/// `Ok(Lookup::Missing)` is a well-formed "no match" answer. `Err` covers
/// everything else: transport failures, non-success statuses and payloads that
/// fail validation.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Look up one title by free text or by external identifier
    async fn lookup(&self, key: &LookupKey) -> AppResult<Lookup>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
