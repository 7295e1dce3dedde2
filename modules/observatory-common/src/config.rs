use std::env;
use std::net::IpAddr;

use tracing::info;

use crate::error::ObservatoryError;

pub const DEFAULT_PROJECT_ID: &str = "ai-4-society";
pub const DEFAULT_DATABASE: &str = "(default)";
pub const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com/v1";

/// Where the emulator listens when local development mode kicks in.
pub const DEFAULT_EMULATOR_HOST: &str = "localhost:8080";

/// Which store the process talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    Production { endpoint: String },
    Emulator { host: String },
}

/// Store connection parameters loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_id: String,
    pub database: String,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub target: StoreTarget,
}

impl Config {
    pub fn from_env() -> Result<Self, ObservatoryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Empty values count
    /// as unset.
    ///
    /// An explicit `FIRESTORE_EMULATOR_HOST` always wins. Otherwise serving
    /// the app from a loopback `OBSERVATORY_HOST` redirects to the emulator
    /// at [`DEFAULT_EMULATOR_HOST`].
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ObservatoryError> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let project_id =
            var("FIRESTORE_PROJECT_ID").unwrap_or_else(|| DEFAULT_PROJECT_ID.to_string());
        if project_id.contains('/') {
            return Err(ObservatoryError::Config(format!(
                "FIRESTORE_PROJECT_ID must not contain '/': {project_id}"
            )));
        }

        let target = match var("FIRESTORE_EMULATOR_HOST") {
            Some(host) => StoreTarget::Emulator { host },
            None => match var("OBSERVATORY_HOST") {
                Some(app_host) if is_loopback_host(&app_host) => StoreTarget::Emulator {
                    host: DEFAULT_EMULATOR_HOST.to_string(),
                },
                _ => StoreTarget::Production {
                    endpoint: var("FIRESTORE_ENDPOINT")
                        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
                },
            },
        };

        Ok(Self {
            project_id,
            database: var("FIRESTORE_DATABASE")
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            api_key: var("FIRESTORE_API_KEY"),
            access_token: var("FIRESTORE_ACCESS_TOKEN"),
            target,
        })
    }

    pub fn is_emulator(&self) -> bool {
        matches!(self.target, StoreTarget::Emulator { .. })
    }

    /// Log the effective configuration with secrets masked.
    pub fn log_redacted(&self) {
        let target = match &self.target {
            StoreTarget::Production { endpoint } => format!("production ({endpoint})"),
            StoreTarget::Emulator { host } => format!("emulator ({host})"),
        };
        info!(
            project_id = self.project_id.as_str(),
            database = self.database.as_str(),
            target = target.as_str(),
            api_key = redact(self.api_key.as_deref()),
            access_token = redact(self.access_token.as_deref()),
            "Store configuration"
        );
    }
}

fn redact(secret: Option<&str>) -> &'static str {
    match secret {
        Some(_) => "[set]",
        None => "[unset]",
    }
}

/// `localhost`, `127.0.0.1`, `[::1]:5173` and friends, with or without a port.
fn is_loopback_host(host: &str) -> bool {
    let name = if let Some(rest) = host.strip_prefix('[') {
        rest.split(']').next().unwrap_or(rest)
    } else if host.matches(':').count() == 1 {
        host.split(':').next().unwrap_or(host)
    } else {
        host
    };

    name.eq_ignore_ascii_case("localhost")
        || name.parse::<IpAddr>().map(|ip| ip.is_loopback()).unwrap_or(false)
}
