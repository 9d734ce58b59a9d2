use std::env;
use std::fmt;
use std::time::Duration;

use crate::session::{Role, SessionContext, UnknownRole, UserProfile};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/";

/// Distinguishes runtime behavior for different stages of the client.
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
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub submission: SubmissionConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url = env::var("APP_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(base_url));
        }

        let timeout_secs = env::var("APP_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidTimeout)?;

        let token = env::var("APP_API_TOKEN").ok();
        let user_id = match env::var("APP_USER_ID") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidUserId)?,
            ),
            Err(_) => None,
        };
        let user_name = env::var("APP_USER_NAME").unwrap_or_default();
        let role = env::var("APP_ROLE")
            .unwrap_or_else(|_| "personnel".to_string())
            .parse::<Role>()
            .map_err(|source| ConfigError::InvalidRole { source })?;

        let redirect_delay_ms = env::var("APP_REDIRECT_DELAY_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidRedirectDelay)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            api: ApiConfig {
                base_url,
                timeout_secs,
            },
            session: SessionConfig {
                token,
                user_id,
                user_name,
                role,
            },
            submission: SubmissionConfig { redirect_delay_ms },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the remote API lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Identity the client acts under. Turned into an explicit [`SessionContext`].
#[derive(Clone)]
pub struct SessionConfig {
    pub token: Option<String>,
    pub user_id: Option<u64>,
    pub user_name: String,
    pub role: Role,
}

impl SessionConfig {
    pub fn context(&self) -> SessionContext {
        let user = self.user_id.map(|id| UserProfile {
            id,
            name: self.user_name.clone(),
        });
        SessionContext::new(self.token.clone(), user, self.role)
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_id", &self.user_id)
            .field("user_name", &self.user_name)
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    pub redirect_delay_ms: u64,
}

impl SubmissionConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidApiUrl(String),
    InvalidTimeout,
    InvalidUserId,
    InvalidRole { source: UnknownRole },
    InvalidRedirectDelay,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidApiUrl(value) => {
                write!(f, "APP_API_URL must be an http(s) URL (found '{}')", value)
            }
            ConfigError::InvalidTimeout => {
                write!(f, "APP_API_TIMEOUT_SECS must be a positive number of seconds")
            }
            ConfigError::InvalidUserId => write!(f, "APP_USER_ID must be a valid u64"),
            ConfigError::InvalidRole { source } => write!(f, "APP_ROLE is invalid: {}", source),
            ConfigError::InvalidRedirectDelay => {
                write!(f, "APP_REDIRECT_DELAY_MS must be a valid number of milliseconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidRole { source } => Some(source),
            ConfigError::InvalidApiUrl(_)
            | ConfigError::InvalidTimeout
            | ConfigError::InvalidUserId
            | ConfigError::InvalidRedirectDelay => None,
        }
    }
}
