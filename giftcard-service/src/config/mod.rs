use config::{ConfigError, Environment, File, Source};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub observability: ObservabilitySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Deserialize, Clone, Debug)]
pub struct UpstreamSettings {
    /// Base URL of the balance lookup service; `/card` is appended.
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Deserialize, Clone, Debug)]
pub struct ObservabilitySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP gRPC collector, e.g. `http://tempo:4317`. Export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load settings from `config/base.yaml` (optional), `APP_*` environment
/// variables (`APP_SERVER__PORT=3000`) and finally the bare `PORT` variable.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| ConfigError::Foreign(Box::new(e)))?;

    // Support running from the workspace root as well as from the crate.
    let configuration_directory = if base_path.ends_with("giftcard-service") {
        base_path.join("config")
    } else {
        base_path.join("giftcard-service").join("config")
    };

    build_settings(
        File::from(configuration_directory.join("base.yaml")).required(false),
        std::env::var("PORT").ok().as_deref(),
    )
}

fn build_settings<S>(base: S, port_override: Option<&str>) -> Result<Settings, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    let port_override = port_override
        .map(|port| {
            port.trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::Message(format!("invalid PORT '{}': {}", port, e)))
        })
        .transpose()?;

    let settings = config::Config::builder()
        .add_source(base)
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("server.port", port_override.map(i64::from))?
        .build()?;

    settings.try_deserialize::<Settings>()
}
