//! Service configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::query::QueryConfig;
use crate::resolver::{ResolverConfig, ScheduleHints};

/// Error building the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set (set RESOLVER_MOCK_FILE to run without it)")]
    MissingApiKey,

    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Where intents come from.
#[derive(Debug, Clone)]
pub enum ResolverSource {
    /// The language model API.
    Gemini(ResolverConfig),
    /// Canned replies from a JSON file.
    Mock(PathBuf),
}

/// Everything `main` needs to start the service.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub resolver: ResolverSource,
    pub schedule_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    /// Endpoint the "Vuelta" trips go to.
    pub origin: String,
    /// Endpoint the "Ida" trips go to.
    pub destination: String,
    pub cache: CacheConfig,
    pub query: QueryConfig,
}

impl BotConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let resolver = match get("RESOLVER_MOCK_FILE") {
            Some(path) => ResolverSource::Mock(PathBuf::from(path)),
            None => {
                let api_key = get("GEMINI_API_KEY").ok_or(ConfigError::MissingApiKey)?;
                let mut config = ResolverConfig::new(api_key);
                if let Some(model) = get("GEMINI_MODEL") {
                    config = config.with_model(model);
                }
                if let Some(url) = get("GEMINI_BASE_URL") {
                    config = config.with_base_url(url.trim_end_matches('/'));
                }
                if let Some(secs) = parsed::<u64>(&get, "RESOLVER_TIMEOUT_SECS")? {
                    config = config.with_timeout(secs);
                }
                ResolverSource::Gemini(config)
            }
        };

        let mut cache = CacheConfig::default();
        if let Some(secs) = parsed::<u64>(&get, "INTENT_CACHE_TTL_SECS")? {
            cache = cache.with_ttl(Duration::from_secs(secs));
        }
        if let Some(n) = parsed::<u64>(&get, "INTENT_CACHE_CAPACITY")? {
            cache = cache.with_max_capacity(n);
        }

        Ok(Self {
            resolver,
            schedule_path: get("SCHEDULE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("Horarios.csv")),
            bind_addr: parsed(&get, "BIND_ADDR")?
                .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000))),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            origin: get("ORIGIN_NAME").unwrap_or_else(|| "Rivadavia".to_string()),
            destination: get("DESTINATION_NAME").unwrap_or_else(|| "Facultad".to_string()),
            cache,
            query: QueryConfig::default(),
        })
    }

    /// Resolver hints for the configured endpoints and the given lines.
    pub fn hints(&self, lines: Vec<String>) -> ScheduleHints {
        ScheduleHints::new(&self.origin, &self.destination).with_lines(lines)
    }
}

fn parsed<T>(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = get(var) else {
        return Ok(None);
    };
    match value.trim().parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => Err(ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
