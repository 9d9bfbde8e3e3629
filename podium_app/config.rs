use dotenvy::dotenv;
use std::{env, time::Duration};

/// Which score store backend the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => StorageBackend::Memory,
            _ => StorageBackend::Postgres,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub storage: StorageBackend,
    /// Leaderboard size when the client doesn't ask for one.
    pub default_limit: usize,
    /// Upper bound for requested leaderboard sizes.
    pub max_limit: usize,
    /// Leaderboard size pushed to live subscribers.
    pub stream_limit: usize,
    pub stream_interval: Duration,
    pub store_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            storage: StorageBackend::Postgres,
            default_limit: 10,
            max_limit: 1000,
            stream_limit: 10,
            stream_interval: Duration::from_millis(2000),
            store_timeout: Duration::from_millis(5000),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        let port = match env::var("PODIUM_PORT") {
            Ok(val) => val.parse::<u16>().unwrap_or(defaults.port),
            Err(_) => defaults.port,
        };

        let storage = match env::var("PODIUM_STORAGE") {
            Ok(val) => StorageBackend::parse(&val),
            Err(_) => defaults.storage,
        };

        let default_limit = match env::var("PODIUM_DEFAULT_LIMIT") {
            Ok(val) => val.parse::<usize>().unwrap_or(defaults.default_limit).max(1),
            Err(_) => defaults.default_limit,
        };

        let max_limit = match env::var("PODIUM_MAX_LIMIT") {
            Ok(val) => val.parse::<usize>().unwrap_or(defaults.max_limit).max(1),
            Err(_) => defaults.max_limit,
        };

        let stream_limit = match env::var("PODIUM_STREAM_LIMIT") {
            Ok(val) => val.parse::<usize>().unwrap_or(defaults.stream_limit).max(1),
            Err(_) => defaults.stream_limit,
        };

        let stream_interval = match env::var("PODIUM_STREAM_INTERVAL_MS") {
            Ok(val) => val
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.stream_interval),
            Err(_) => defaults.stream_interval,
        };

        let store_timeout = match env::var("PODIUM_STORE_TIMEOUT_MS") {
            Ok(val) => val
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.store_timeout),
            Err(_) => defaults.store_timeout,
        };

        Self {
            port,
            storage,
            default_limit,
            max_limit,
            stream_limit,
            stream_interval,
            store_timeout,
        }
    }
}
