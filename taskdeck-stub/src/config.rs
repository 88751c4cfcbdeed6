//! Configuration for the stub server binary.
//!
//! Same layering as the client: CLI args > TOML config file > defaults.
//! Missing default config file is not an error.

use std::path::PathBuf;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum StubConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    server: ServerFileConfig,
}

/// `[server]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerFileConfig {
    bind_addr: Option<String>,
    log_level: Option<String>,
}

/// Fully resolved stub server configuration.
#[derive(Debug, Clone)]
pub struct StubConfig {
    /// Address to bind (e.g. `0.0.0.0:8080`).
    pub bind_addr: String,
    /// Log level filter.
    pub log_level: String,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl StubConfig {
    /// Load configuration by merging CLI args and a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`StubConfigError`] if an explicit config file cannot be
    /// read or parsed.
    pub fn load(cli: &StubCliArgs) -> Result<Self, StubConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    fn resolve(cli: &StubCliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: cli
                .bind
                .clone()
                .or_else(|| file.server.bind_addr.clone())
                .unwrap_or(defaults.bind_addr),
            log_level: cli
                .log_level
                .clone()
                .or_else(|| file.server.log_level.clone())
                .unwrap_or(defaults.log_level),
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "In-memory task board API server")]
pub struct StubCliArgs {
    /// Address to bind (e.g. `127.0.0.1:8080`).
    #[arg(long, env = "TASKDECK_STUB_ADDR")]
    pub bind: Option<String>,

    /// Path to config file (default: `~/.config/taskdeck/stub.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, env = "TASKDECK_STUB_LOG")]
    pub log_level: Option<String>,
}

fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, StubConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| StubConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskdeck").join("stub.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(StubConfigError::ReadFile { path, source: e }),
    }
}
