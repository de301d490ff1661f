//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `MONIKER_*` environment
//! variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_FALLBACK_CANDIDATES, DEFAULT_K_MODIFIERS, DEFAULT_K_NOUNS,
    DEFAULT_MMR_LAMBDA, DEFAULT_RECOMMEND_K, DEFAULT_TOP_SIMILAR,
};

/// Default embedding-service endpoint used when `MONIKER_EMBEDDER_URL` is not set.
pub const DEFAULT_EMBEDDER_URL: &str = "http://localhost:8001";

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `MONIKER_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Embedding vector dimension. Default: `768`.
    pub vector_dimension: usize,

    /// Directory holding the phrase index snapshot. Default: `./index`.
    pub index_path: PathBuf,

    /// Embedding-service base URL. Default: `http://localhost:8001`.
    pub embedder_url: String,

    /// Per-call embedder timeout. Default: `30s`.
    pub embedder_timeout: Duration,

    /// Bounded retry count for 5xx/transport embedder errors. Default: `3`.
    pub embedder_retries: usize,

    /// MMR relevance/diversity weight. Default: `0.7`.
    pub mmr_lambda: f32,

    /// Modifier filter size for candidate generation. Default: `20`.
    pub k_modifiers: usize,

    /// Noun filter size for candidate generation. Default: `30`.
    pub k_nouns: usize,

    /// Number of titles per recommendation. Default: `3`.
    pub recommend_k: usize,

    /// Size of the raw-similarity extract. Default: `5`.
    pub top_similar: usize,

    /// Candidate count requested from the index on the fallback path. Default: `50`.
    pub fallback_candidates: usize,

    /// Optional override for the modifier vocabulary file.
    pub modifier_path: Option<PathBuf>,

    /// Optional override for the noun vocabulary file.
    pub noun_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            vector_dimension: DEFAULT_EMBEDDING_DIM,
            index_path: PathBuf::from("./index"),
            embedder_url: DEFAULT_EMBEDDER_URL.to_string(),
            embedder_timeout: Duration::from_secs(30),
            embedder_retries: 3,
            mmr_lambda: DEFAULT_MMR_LAMBDA,
            k_modifiers: DEFAULT_K_MODIFIERS,
            k_nouns: DEFAULT_K_NOUNS,
            recommend_k: DEFAULT_RECOMMEND_K,
            top_similar: DEFAULT_TOP_SIMILAR,
            fallback_candidates: DEFAULT_FALLBACK_CANDIDATES,
            modifier_path: None,
            noun_path: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "MONIKER_PORT";
    const ENV_BIND_ADDR: &'static str = "MONIKER_BIND_ADDR";
    const ENV_VECTOR_DIMENSION: &'static str = "MONIKER_VECTOR_DIMENSION";
    const ENV_INDEX_PATH: &'static str = "MONIKER_INDEX_PATH";
    const ENV_EMBEDDER_URL: &'static str = "MONIKER_EMBEDDER_URL";
    const ENV_EMBEDDER_TIMEOUT_SECS: &'static str = "MONIKER_EMBEDDER_TIMEOUT_SECS";
    const ENV_EMBEDDER_RETRIES: &'static str = "MONIKER_EMBEDDER_RETRIES";
    const ENV_MMR_LAMBDA: &'static str = "MONIKER_MMR_LAMBDA";
    const ENV_K_MODIFIERS: &'static str = "MONIKER_K_MODIFIERS";
    const ENV_K_NOUNS: &'static str = "MONIKER_K_NOUNS";
    const ENV_RECOMMEND_K: &'static str = "MONIKER_RECOMMEND_K";
    const ENV_TOP_SIMILAR: &'static str = "MONIKER_TOP_SIMILAR";
    const ENV_FALLBACK_CANDIDATES: &'static str = "MONIKER_FALLBACK_CANDIDATES";
    const ENV_MODIFIER_PATH: &'static str = "MONIKER_MODIFIER_PATH";
    const ENV_NOUN_PATH: &'static str = "MONIKER_NOUN_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let vector_dimension =
            Self::parse_usize_from_env(Self::ENV_VECTOR_DIMENSION, defaults.vector_dimension)?;
        let index_path = Self::parse_path_from_env(Self::ENV_INDEX_PATH, defaults.index_path);
        let embedder_url =
            Self::parse_string_from_env(Self::ENV_EMBEDDER_URL, defaults.embedder_url);
        let timeout_secs = Self::parse_usize_from_env(
            Self::ENV_EMBEDDER_TIMEOUT_SECS,
            defaults.embedder_timeout.as_secs() as usize,
        )?;
        let embedder_retries =
            Self::parse_usize_from_env(Self::ENV_EMBEDDER_RETRIES, defaults.embedder_retries)?;
        let mmr_lambda = Self::parse_lambda_from_env(defaults.mmr_lambda)?;
        let k_modifiers = Self::parse_usize_from_env(Self::ENV_K_MODIFIERS, defaults.k_modifiers)?;
        let k_nouns = Self::parse_usize_from_env(Self::ENV_K_NOUNS, defaults.k_nouns)?;
        let recommend_k = Self::parse_usize_from_env(Self::ENV_RECOMMEND_K, defaults.recommend_k)?;
        let top_similar = Self::parse_usize_from_env(Self::ENV_TOP_SIMILAR, defaults.top_similar)?;
        let fallback_candidates = Self::parse_usize_from_env(
            Self::ENV_FALLBACK_CANDIDATES,
            defaults.fallback_candidates,
        )?;
        let modifier_path = Self::parse_optional_path_from_env(Self::ENV_MODIFIER_PATH);
        let noun_path = Self::parse_optional_path_from_env(Self::ENV_NOUN_PATH);

        Ok(Self {
            port,
            bind_addr,
            vector_dimension,
            index_path,
            embedder_url,
            embedder_timeout: Duration::from_secs(timeout_secs as u64),
            embedder_retries,
            mmr_lambda,
            k_modifiers,
            k_nouns,
            recommend_k,
            top_similar,
            fallback_candidates,
            modifier_path,
            noun_path,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.index_path.exists() && !self.index_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.index_path.clone(),
            });
        }

        if self.embedder_url.trim().is_empty()
            || !(self.embedder_url.starts_with("http://")
                || self.embedder_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidEmbedderUrl {
                value: self.embedder_url.clone(),
            });
        }

        for path in [&self.modifier_path, &self.noun_path].into_iter().flatten() {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_lambda_from_env(default: f32) -> Result<f32, ConfigError> {
        match env::var(Self::ENV_MMR_LAMBDA) {
            Ok(value) => {
                let lambda: f32 = value.parse().map_err(|_| ConfigError::InvalidLambda {
                    value: value.clone(),
                })?;
                if !(0.0..=1.0).contains(&lambda) {
                    return Err(ConfigError::InvalidLambda { value });
                }
                Ok(lambda)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                name: var_name,
                value,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}
