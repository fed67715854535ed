use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::constitution::{
    ConstitutionScorer, ScorerConfig, ScorerConfigError, TieBreakOrder, WeightProfile,
    WeightTable, WeightTableError,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Weight table selection and labelling policy for the constitution scorer.
#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    pub profile: WeightProfile,
    pub table_path: Option<PathBuf>,
    pub scorer: ScorerConfig,
}

impl ScoringConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut scoring = Self::default();

        if let Ok(raw) = env::var("PRAKRITI_WEIGHT_PROFILE") {
            scoring.profile =
                WeightProfile::parse(&raw).ok_or(ConfigError::InvalidProfile(raw))?;
        }

        scoring.table_path = env::var("PRAKRITI_WEIGHT_TABLE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        if let Ok(raw) = env::var("PRAKRITI_COMBINED_LABEL") {
            scoring.scorer.combined_label_enabled = parse_flag(&raw).ok_or(
                ConfigError::InvalidFlag {
                    name: "PRAKRITI_COMBINED_LABEL",
                    value: raw,
                },
            )?;
        }

        if let Ok(raw) = env::var("PRAKRITI_CLOSENESS_THRESHOLD") {
            scoring.scorer.closeness_threshold = raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|threshold| *threshold <= 100)
                .ok_or(ConfigError::InvalidThreshold(raw))?;
        }

        if let Ok(raw) = env::var("PRAKRITI_TIE_BREAK") {
            scoring.scorer.tie_break_order =
                TieBreakOrder::parse_list(&raw).map_err(ConfigError::InvalidTieBreak)?;
        }

        Ok(scoring)
    }

    /// Resolves the weight table (file override first, then the named profile).
    pub fn weight_table(&self) -> Result<WeightTable, ConfigError> {
        match &self.table_path {
            Some(path) => WeightTable::from_path(path).map_err(|source| ConfigError::WeightTable {
                path: path.clone(),
                source,
            }),
            None => Ok(self.profile.table()),
        }
    }

    pub fn build_scorer(&self) -> Result<ConstitutionScorer, ConfigError> {
        Ok(ConstitutionScorer::new(
            self.weight_table()?,
            self.scorer.clone(),
        ))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidProfile(String),
    InvalidFlag {
        name: &'static str,
        value: String,
    },
    InvalidThreshold(String),
    InvalidTieBreak(ScorerConfigError),
    WeightTable {
        path: PathBuf,
        source: WeightTableError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidProfile(value) => write!(
                f,
                "PRAKRITI_WEIGHT_PROFILE must be 'intake' or 'assessment', found '{value}'"
            ),
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean, found '{value}'")
            }
            ConfigError::InvalidThreshold(value) => write!(
                f,
                "PRAKRITI_CLOSENESS_THRESHOLD must be between 0 and 100, found '{value}'"
            ),
            ConfigError::InvalidTieBreak(err) => write!(f, "PRAKRITI_TIE_BREAK: {err}"),
            ConfigError::WeightTable { path, source } => {
                write!(f, "weight table {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidTieBreak(err) => Some(err),
            ConfigError::WeightTable { source, .. } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidProfile(_)
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidThreshold(_) => None,
        }
    }
}
