use thiserror::Error;

/// Why a search produced no batch.
///
/// The UI shows every variant the same way; the distinction is kept for logs.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("jobs API returned status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("could not parse jobs API response: {0}")]
    Parse(String),

    #[error("network error talking to jobs API: {0}")]
    Transport(String),
}

impl SearchError {
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::Remote { .. } => "remote",
            SearchError::Parse(_) => "parse",
            SearchError::Transport(_) => "transport",
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SearchError::Parse(err.to_string())
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Parse(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "{0} environment variable not set. Set it with: export {0}=your-key-here"
    )]
    MissingEnv(&'static str),

    #[error("{name} must be a number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("invalid endpoint URL '{0}'")]
    InvalidEndpoint(String),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
