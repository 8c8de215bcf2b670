use serde::Deserialize;
use service_core::error::AppError;
use std::collections::HashSet;
use std::path::Path;

/// Settings read once at startup. Never mutated afterwards; the router
/// receives them behind an `Arc`.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub framework: FrameworkSettings,
    #[serde(default)]
    pub access: AccessSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint (e.g. http://tempo:4317). Export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Options that shape how responses are produced.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FrameworkSettings {
    /// Packages served verbatim from `<static_dir>/vendor/<package>`,
    /// bypassing response compression.
    #[serde(default)]
    pub server_external_packages: Vec<String>,
    /// Adds hardening headers to every response.
    #[serde(default = "default_true")]
    pub strict_mode: bool,
    /// Compresses processed responses (gzip/brotli).
    #[serde(default = "default_true")]
    pub minify: bool,
}

impl Default for FrameworkSettings {
    fn default() -> Self {
        Self {
            server_external_packages: Vec::new(),
            strict_mode: true,
            minify: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AccessSettings {
    #[serde(default)]
    pub mode: AccessMode,
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

impl Default for AccessSettings {
    fn default() -> Self {
        Self {
            mode: AccessMode::default(),
            login_path: default_login_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    /// Protected pages require a signed-in session.
    #[default]
    Session,
    /// Every page renders for everyone. Refused in production.
    Bypass,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_static_dir() -> String {
    "portal-frontend/static".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Checks the rules the deserializer cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access.mode == AccessMode::Bypass && self.server.environment.is_production() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "access.mode = bypass is not allowed when server.environment = production"
            )));
        }

        if !self.access.login_path.starts_with('/') {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "access.login_path must be an absolute path, got '{}'",
                self.access.login_path
            )));
        }

        let mut seen = HashSet::new();
        for package in &self.framework.server_external_packages {
            if !is_valid_package_name(package) {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "invalid entry in framework.server_external_packages: '{}'",
                    package
                )));
            }
            if !seen.insert(package.as_str()) {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "duplicate entry in framework.server_external_packages: '{}'",
                    package
                )));
            }
        }

        Ok(())
    }
}

/// Package names become a literal route segment and a directory name:
/// `[A-Za-z0-9._@-]` only, and never `.` or `..`.
fn is_valid_package_name(package: &str) -> bool {
    !package.is_empty()
        && package != "."
        && !package.contains("..")
        && package
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '@' | '-'))
}

/// Loads `base.yaml` from `configuration_directory`, overlaid with
/// `APP_`-prefixed environment variables (`APP_SERVER__PORT=9000`).
pub fn load_from(configuration_directory: &Path) -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("framework.server_external_packages")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;

    // Works from both the workspace root and the crate directory
    let configuration_directory = if base_path.ends_with("portal-frontend") {
        base_path.join("config")
    } else {
        base_path.join("portal-frontend").join("config")
    };

    load_from(&configuration_directory)
}
