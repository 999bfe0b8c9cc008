use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::query::ANYWHERE;

pub const DEFAULT_ENDPOINT: &str = "https://jobs-api14.p.rapidapi.com/v2/list";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_LOCATIONS: &[&str] = &[
    "United States",
    "United Kingdom",
    "Canada",
    "Germany",
    "India",
    "Australia",
];

const ENV_API_KEY: &str = "JOBBOARD_API_KEY";
const ENV_API_HOST: &str = "JOBBOARD_API_HOST";
const ENV_ENDPOINT: &str = "JOBBOARD_ENDPOINT";
const ENV_TIMEOUT: &str = "JOBBOARD_TIMEOUT_SECS";
const ENV_DEBOUNCE: &str = "JOBBOARD_DEBOUNCE_MS";

/// Optional `config.toml`. Credentials never live here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub debounce_ms: Option<u64>,
    pub locations: Vec<String>,
}

impl FileConfig {
    /// A missing file is an empty config.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub api_host: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub debounce: Duration,
    /// Location choices offered by the selector; always starts with "anywhere".
    pub locations: Vec<String>,
}

impl Config {
    /// Loads `.env`, then the config file, then lets the environment override.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let path = config_path.map(Path::to_path_buf).or_else(default_config_path);
        let file = match &path {
            Some(path) => FileConfig::read(path)?,
            None => FileConfig::default(),
        };
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    pub fn from_sources(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let endpoint = env(ENV_ENDPOINT)
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let url = reqwest::Url::parse(&endpoint)
            .map_err(|_| ConfigError::InvalidEndpoint(endpoint.clone()))?;

        let api_host = match env(ENV_API_HOST).filter(|h| !h.is_empty()) {
            Some(host) => host,
            None => url
                .host_str()
                .ok_or_else(|| ConfigError::InvalidEndpoint(endpoint.clone()))?
                .to_string(),
        };

        let timeout_secs = number_from_env(&env, ENV_TIMEOUT)?
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let debounce_ms = number_from_env(&env, ENV_DEBOUNCE)?
            .or(file.debounce_ms)
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        let mut locations = vec![ANYWHERE.to_string()];
        let configured: Vec<String> = if file.locations.is_empty() {
            DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect()
        } else {
            file.locations
        };
        for location in configured {
            let location = location.trim().to_string();
            if !location.is_empty() && !locations.contains(&location) {
                locations.push(location);
            }
        }

        Ok(Self {
            endpoint,
            api_host,
            api_key: env(ENV_API_KEY).filter(|k| !k.is_empty()),
            timeout: Duration::from_secs(timeout_secs),
            debounce: Duration::from_millis(debounce_ms),
            locations,
        })
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingEnv(ENV_API_KEY))
    }

    pub fn log_redacted(&self) {
        let api_key = if self.api_key.is_some() { "<set>" } else { "<missing>" };
        tracing::info!(
            endpoint = %self.endpoint,
            api_host = %self.api_host,
            api_key,
            timeout_secs = self.timeout.as_secs(),
            debounce_ms = self.debounce.as_millis() as u64,
            locations = self.locations.len(),
            "Loaded configuration"
        );
    }
}

fn number_from_env(
    env: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match env(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(None),
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "jobboard")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Directory for the TUI log file; falls back to the current directory.
pub fn log_dir() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env_or_file() {
        let config = Config::from_sources(FileConfig::default(), env_from(&[])).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.api_host, "jobs-api14.p.rapidapi.com");
        assert_eq!(config.api_key, None);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert_eq!(config.locations[0], "anywhere");
        assert!(config.locations.contains(&"Germany".to_string()));
    }

    #[test]
    fn test_api_key_required_for_searches() {
        let config = Config::from_sources(FileConfig::default(), env_from(&[])).unwrap();
        let err = config.api_key().unwrap_err();
        assert!(err.to_string().contains("JOBBOARD_API_KEY"));

        let config = Config::from_sources(
            FileConfig::default(),
            env_from(&[("JOBBOARD_API_KEY", "secret")]),
        )
        .unwrap();
        assert_eq!(config.api_key().unwrap(), "secret");
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            endpoint: Some("https://file.example.com/v2/list".to_string()),
            timeout_secs: Some(5),
            debounce_ms: Some(250),
            locations: vec![],
        };
        let config = Config::from_sources(
            file,
            env_from(&[
                ("JOBBOARD_ENDPOINT", "http://127.0.0.1:8080/v2/list"),
                ("JOBBOARD_DEBOUNCE_MS", "100"),
                ("JOBBOARD_API_HOST", "jobs.internal"),
            ]),
        )
        .unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:8080/v2/list");
        assert_eq!(config.api_host, "jobs.internal");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.debounce, Duration::from_millis(100));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = Config::from_sources(
            FileConfig::default(),
            env_from(&[("JOBBOARD_TIMEOUT_SECS", "soon")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { name: "JOBBOARD_TIMEOUT_SECS", .. }));

        let err = Config::from_sources(
            FileConfig::default(),
            env_from(&[("JOBBOARD_ENDPOINT", "not a url")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint(_)));
    }

    #[test]
    fn test_locations_deduplicated_and_anywhere_first() {
        let file = FileConfig {
            locations: vec![
                "Berlin".to_string(),
                "anywhere".to_string(),
                " Berlin ".to_string(),
                "".to_string(),
                "Lisbon".to_string(),
            ],
            ..FileConfig::default()
        };
        let config = Config::from_sources(file, env_from(&[])).unwrap();
        assert_eq!(config.locations, vec!["anywhere", "Berlin", "Lisbon"]);
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(FileConfig::read(&path).unwrap().endpoint.is_none());

        std::fs::write(
            &path,
            "endpoint = \"https://example.com/list\"\ndebounce_ms = 300\nlocations = [\"Paris\"]\n",
        )
        .unwrap();
        let file = FileConfig::read(&path).unwrap();
        assert_eq!(file.endpoint.as_deref(), Some("https://example.com/list"));
        assert_eq!(file.debounce_ms, Some(300));
        assert_eq!(file.locations, vec!["Paris"]);

        std::fs::write(&path, "api_key = \"leaked\"\n").unwrap();
        assert!(matches!(
            FileConfig::read(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
