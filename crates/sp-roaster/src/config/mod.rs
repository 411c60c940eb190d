use crate::analysis::classify::ClassifierConfig;
use crate::analysis::scoring::ScoringConfig;
use std::env;
use std::net::{IpAddr, SocketAddr};

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

/// Process-level configuration, all sourced from `ROASTER_*` environment
/// variables (with `.env` support). The engine section carries optional
/// threshold overrides; weights and archetype rules keep their stock
/// defaults unless code injects a full config.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("ROASTER_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("ROASTER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("ROASTER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("ROASTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            engine: EngineConfig::from_env()?,
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

/// Optional environment overrides for the audit engine thresholds. Unset
/// variables fall back to the stock defaults when the configs are built.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub min_campaign_spend: Option<f64>,
    pub negative_coverage_ratio: Option<f64>,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            min_campaign_spend: optional_f64("ROASTER_MIN_CAMPAIGN_SPEND")?,
            negative_coverage_ratio: optional_f64("ROASTER_NEGATIVE_COVERAGE_RATIO")?,
        })
    }

    pub fn classifier_config(&self) -> ClassifierConfig {
        let mut config = ClassifierConfig::default();
        if let Some(ratio) = self.negative_coverage_ratio {
            config.negative_coverage_ratio = ratio;
        }
        config
    }

    pub fn scoring_config(&self) -> ScoringConfig {
        let mut config = ScoringConfig::default();
        if let Some(spend) = self.min_campaign_spend {
            config.min_campaign_spend = spend;
        }
        config
    }
}

fn optional_f64(name: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ROASTER_PORT must be a valid u16")]
    InvalidPort,
    #[error("ROASTER_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("{name} must be a number")]
    InvalidNumber { name: &'static str },
}
