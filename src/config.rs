use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OMDb API key, sent as `apikey` on every request
    pub omdb_api_key: String,

    /// OMDb API endpoint
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Base of the public catalog page linked from the detail panel
    #[serde(default = "default_imdb_title_url")]
    pub imdb_title_url: String,

    /// Titles prefetched for the recommendation grid (comma-separated)
    #[serde(default = "default_titles")]
    pub default_titles: Vec<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

pub const DEFAULT_TITLES: [&str; 10] = [
    "Inception",
    "Interstellar",
    "The Dark Knight",
    "Avatar",
    "Titanic",
    "Avengers: Endgame",
    "Joker",
    "John wick",
    "stree",
    "war 2",
];

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_imdb_title_url() -> String {
    "https://www.imdb.com/title".to_string()
}

fn default_titles() -> Vec<String> {
    DEFAULT_TITLES.iter().map(|t| t.to_string()).collect()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        config.default_titles = config
            .default_titles
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
