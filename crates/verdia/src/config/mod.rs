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
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration, sourced from `VERDIA_*` environment variables
/// with a `.env` file honoured in development.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub survey: SurveyConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(&env_or("VERDIA_ENV", "development"));

        let port_raw = env_or("VERDIA_PORT", "3000");
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort { value: port_raw })?;

        Ok(Self {
            environment,
            server: ServerConfig {
                host: env_or("VERDIA_HOST", "127.0.0.1"),
                port,
            },
            telemetry: TelemetryConfig {
                log_level: env_or("VERDIA_LOG", "info"),
            },
            survey: SurveyConfig::from_env(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
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

/// Tracing controls for the fmt subscriber.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Deployment knobs for the survey pipeline: which question opens the
/// partner gate, the signal phrase looked for in it, and the language the
/// store holds answers in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyConfig {
    pub gate_question_id: Option<String>,
    pub gate_signal: String,
    pub canonical_language: String,
    pub translate_from: Vec<String>,
}

impl SurveyConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gate_question_id: env::var("VERDIA_GATE_QUESTION").ok(),
            gate_signal: env_or("VERDIA_GATE_SIGNAL", &defaults.gate_signal),
            canonical_language: env_or("VERDIA_CANONICAL_LANG", &defaults.canonical_language),
            translate_from: env::var("VERDIA_SOURCE_LANGS")
                .map(|raw| {
                    raw.split(',')
                        .map(|tag| tag.trim().to_string())
                        .filter(|tag| !tag.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.translate_from),
        }
    }
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            gate_question_id: None,
            gate_signal: "aesthetic".to_string(),
            canonical_language: "en".to_string(),
            translate_from: vec!["pt".to_string()],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("VERDIA_PORT '{value}' is not a valid u16")]
    InvalidPort { value: String },
    #[error("VERDIA_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost { source: std::net::AddrParseError },
}
