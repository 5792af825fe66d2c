use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::Display;

use crate::error::{AppError, AppResult};

/// Marker OMDb uses for fields it has no value for
pub const NOT_AVAILABLE: &str = "N/A";

/// Key for a single metadata lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKey {
    /// Free-text title, sent as `t`
    Title(String),
    /// External (IMDb) identifier, sent as `i`
    Id(String),
}

impl LookupKey {
    /// OMDb query parameter name for this key
    pub fn param(&self) -> &'static str {
        match self {
            LookupKey::Title(_) => "t",
            LookupKey::Id(_) => "i",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            LookupKey::Title(title) => title,
            LookupKey::Id(id) => id,
        }
    }
}

impl Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupKey::Title(title) => write!(f, "title:{}", title),
            LookupKey::Id(id) => write!(f, "id:{}", id),
        }
    }
}

/// A single rating entry (e.g. Rotten Tomatoes)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Metadata for one title, as returned by a successful OMDb lookup
///
/// `title`, `year` and `imdb_id` are required; a payload without them is
/// rejected. Descriptive fields OMDb leaves out fall back to `"N/A"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Rated", default = "not_available")]
    pub rated: String,
    #[serde(rename = "Released", default = "not_available")]
    pub released: String,
    #[serde(rename = "Runtime", default = "not_available")]
    pub runtime: String,
    #[serde(rename = "Genre", default = "not_available")]
    pub genre: String,
    #[serde(rename = "Director", default = "not_available")]
    pub director: String,
    #[serde(rename = "Writer", default = "not_available")]
    pub writer: String,
    #[serde(rename = "Actors", default = "not_available")]
    pub actors: String,
    #[serde(rename = "Plot", default = "not_available")]
    pub plot: String,
    #[serde(rename = "Language", default = "not_available")]
    pub language: String,
    #[serde(rename = "Country", default = "not_available")]
    pub country: String,
    #[serde(rename = "Awards", default = "not_available")]
    pub awards: String,
    /// Poster image URL; `None` when OMDb reports `"N/A"`
    #[serde(rename = "Poster", default, deserialize_with = "na_as_none")]
    pub poster: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<Rating>,
    #[serde(rename = "Metascore", default = "not_available")]
    pub metascore: String,
    #[serde(rename = "imdbRating", default = "not_available")]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes", default = "not_available")]
    pub imdb_votes: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default = "not_available")]
    pub kind: String,
    #[serde(rename = "BoxOffice", default = "not_available")]
    pub box_office: String,
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

fn na_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty() && v != NOT_AVAILABLE))
}

impl MovieRecord {
    /// Link to the title's public catalog page
    pub fn catalog_url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.imdb_id)
    }
}

/// Outcome of a well-formed lookup response
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// `Response: "True"`
    Found(MovieRecord),
    /// `Response: "False"`; `reason` is the service's `Error` text
    Missing { reason: String },
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

impl Lookup {
    /// Validates a raw OMDb payload
    ///
    /// Fails with [`AppError::Parse`] when the success sentinel is absent or
    /// unrecognized, or when a `"True"` payload lacks required fields.
    pub fn from_payload(payload: Value) -> AppResult<Self> {
        let envelope: Envelope = serde_json::from_value(payload.clone())
            .map_err(|e| AppError::Parse(format!("missing Response sentinel: {}", e)))?;

        match envelope.response.as_str() {
            "True" => {
                let record: MovieRecord = serde_json::from_value(payload)?;
                Ok(Lookup::Found(record))
            }
            "False" => Ok(Lookup::Missing {
                reason: envelope
                    .error
                    .unwrap_or_else(|| "Movie not found!".to_string()),
            }),
            other => Err(AppError::Parse(format!(
                "unexpected Response value {:?}",
                other
            ))),
        }
    }

    pub fn found(self) -> Option<MovieRecord> {
        match self {
            Lookup::Found(record) => Some(record),
            Lookup::Missing { .. } => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A complete record as OMDb would return it
    pub fn record(title: &str, imdb_id: &str) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            year: "2010".to_string(),
            rated: "PG-13".to_string(),
            released: "16 Jul 2010".to_string(),
            runtime: "148 min".to_string(),
            genre: "Action, Adventure, Sci-Fi".to_string(),
            director: "Christopher Nolan".to_string(),
            writer: "Christopher Nolan".to_string(),
            actors: "Leonardo DiCaprio, Joseph Gordon-Levitt".to_string(),
            plot: "A thief who steals corporate secrets.".to_string(),
            language: "English".to_string(),
            country: "United States".to_string(),
            awards: "Won 4 Oscars".to_string(),
            poster: Some(format!("https://img.example/{}.jpg", imdb_id)),
            ratings: vec![],
            metascore: "74".to_string(),
            imdb_rating: "8.8".to_string(),
            imdb_votes: "2,600,000".to_string(),
            imdb_id: imdb_id.to_string(),
            kind: "movie".to_string(),
            box_office: "$292,587,330".to_string(),
        }
    }
}
