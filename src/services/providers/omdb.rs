/// OMDb API provider
///
/// One GET per lookup against the configured endpoint:
/// - title lookup: `?t=<title>&apikey=<key>`
/// - identifier lookup: `?i=<imdb id>&apikey=<key>`
///
/// OMDb answers HTTP 200 for both hits and misses; the `Response` field tells them apart.
use crate::{
    error::{AppError, AppResult},
    models::{Lookup, LookupKey},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use serde_json::Value;

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for OmdbProvider {
    async fn lookup(&self, key: &LookupKey) -> AppResult<Lookup> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[(key.param(), key.value()), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw OMDb API response");

        let payload: Value = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize OMDb response"
            );
            AppError::Parse(format!("Failed to parse OMDb response: {}", e))
        })?;

        let lookup = Lookup::from_payload(payload)?;

        match &lookup {
            Lookup::Found(record) => tracing::info!(
                key = %key,
                imdb_id = %record.imdb_id,
                provider = "omdb",
                "Lookup matched"
            ),
            Lookup::Missing { reason } => tracing::info!(
                key = %key,
                reason = %reason,
                provider = "omdb",
                "Lookup found no match"
            ),
        }

        Ok(lookup)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
