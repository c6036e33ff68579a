use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Answer CORS preflights so a UI dev server on another origin can call us
    #[serde(default = "default_cors")]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: default_cors(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Knobs for the simulated backend itself.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    /// Token returned by register, login and profile update
    #[serde(default = "default_token")]
    pub token: String,
    /// `jwt` returned with a placed order
    #[serde(default = "default_order_token")]
    pub order_token: String,
    /// Id stamped on every placed order
    #[serde(default = "default_order_id")]
    pub order_id: u64,
    /// Seed for franchise admin ids; random per run when unset
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// Upstream base URL for requests the simulator does not mock
    #[serde(default)]
    pub passthrough_url: Option<String>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            token: default_token(),
            order_token: default_order_token(),
            order_id: default_order_id(),
            rng_seed: None,
            passthrough_url: None,
        }
    }
}

fn default_token() -> String {
    "abcdef".to_string()
}

fn default_order_token() -> String {
    "eyJpYXQ".to_string()
}

fn default_order_id() -> u64 {
    23
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_toml_str(&content)
        } else {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).with_context(|| "Failed to parse configuration file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("server.port must be non-zero");
        }
        if self.simulator.token.is_empty() {
            bail!("simulator.token must not be empty");
        }
        if let Some(url) = &self.simulator.passthrough_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("simulator.passthrough_url must be an http(s) URL, got {}", url);
            }
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert!(config.server.cors);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.simulator.token, "abcdef");
        assert_eq!(config.simulator.order_token, "eyJpYXQ");
        assert_eq!(config.simulator.order_id, 23);
        assert!(config.simulator.rng_seed.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [server]
            port = 4010

            [simulator]
            rng_seed = 7
            passthrough_url = "http://localhost:5173"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 4010);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.simulator.rng_seed, Some(7));
        assert_eq!(config.simulator.token, "abcdef");
    }

    #[test]
    fn test_rejects_bad_passthrough_url() {
        let err = Config::from_toml_str(
            r#"
            [simulator]
            passthrough_url = "localhost:5173"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("passthrough_url"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
