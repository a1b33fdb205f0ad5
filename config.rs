use crate::*;
use std::path::PathBuf;

pub static ENV_PORT: &str = "PORT";
pub static ENV_TODOS_FILE: &str = "TODOS_FILE";
pub static ENV_REQUEST_BODY_LIMIT: &str = "REQUEST_BODY_LIMIT";
pub static ENV_LOG_DIR: &str = "LOG_DIR";

const DEFAULT_PORT: u16 = 80;
const DEFAULT_TODOS_FILE: &str = "todos.json";
const DEFAULT_REQUEST_BODY_LIMIT: usize = 1_000_000;

/// Holds basic information about the app, read from env vars (and `.env` if present)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: &'static str,
    pub port: u16,
    /// JSON file that holds the whole todo list
    pub data_file: PathBuf,
    pub request_body_limit: usize,
    /// Enables daily rolling log files in this directory
    pub log_dir: Option<PathBuf>,
    /// `.env` file the vars were loaded from, if any
    pub env_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let env_file = dotenvy::dotenv().ok();
        Self {
            env_file,
            ..Self::from_lookup(|key| env::var(key).ok())
        }
    }

    /// Builds the config from any key-value source, invalid values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup(ENV_PORT)
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_file = lookup(ENV_TODOS_FILE)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_TODOS_FILE.to_owned())
            .into();
        let request_body_limit = lookup(ENV_REQUEST_BODY_LIMIT)
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_REQUEST_BODY_LIMIT);
        let log_dir = lookup(ENV_LOG_DIR).filter(|v| !v.is_empty()).map(PathBuf::from);

        Self {
            name: env!("CARGO_PKG_NAME"),
            port,
            data_file,
            request_body_limit,
            log_dir,
            env_file: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_without_env() {
        let config = AppConfig::default();
        assert_eq!(config.port, 80);
        assert_eq!(config.data_file, PathBuf::from("todos.json"));
        assert_eq!(config.request_body_limit, 1_000_000);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let vars = HashMap::from([
            (ENV_PORT, "8080"),
            (ENV_TODOS_FILE, "/var/lib/todos/list.json"),
            (ENV_REQUEST_BODY_LIMIT, "lots"),
            (ENV_LOG_DIR, "/var/log/todos"),
        ]);
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_file, PathBuf::from("/var/lib/todos/list.json"));
        assert_eq!(config.request_body_limit, 1_000_000);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/todos")));

        let config = AppConfig::from_lookup(|k| (k == ENV_PORT).then(|| "99999".to_owned()));
        assert_eq!(config.port, 80);
    }
}
