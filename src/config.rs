use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use tokio::sync::Semaphore;

/// Host the listener binds to. Only the port is configurable.
pub const SERVER_HOST: &str = "localhost";

/// Server configuration, built once at startup and read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base directory every request target is resolved against
    pub document_root: PathBuf,
    /// Port to listen on
    pub port: u16,
    pub limits: Limits,
}

/// Optional hardening. Unset means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Limits {
    /// Maximum number of connections handled at once
    pub max_connections: Option<usize>,
    /// How long a client may take to send its request line
    pub read_timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            document_root: PathBuf::from("./"),
            port: 8080,
            limits: Limits::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid config file")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&contents)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(max) = self.limits.max_connections {
            anyhow::ensure!(
                (1..=Semaphore::MAX_PERMITS).contains(&max),
                "max_connections must be between 1 and {}",
                Semaphore::MAX_PERMITS
            );
        }
        if let Some(ms) = self.limits.read_timeout_ms {
            anyhow::ensure!(ms > 0, "read_timeout_ms must be positive");
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", SERVER_HOST, self.port)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.limits.read_timeout_ms.map(Duration::from_millis)
    }
}

/// Command-line flags. Anything given here overrides the config file.
#[derive(Debug, Parser)]
#[command(name = "statik", version, about = "Minimal HTTP/1.0 static file server")]
pub struct Cli {
    /// Document root for all the files [default: ./]
    #[arg(long = "document_root")]
    pub document_root: Option<PathBuf>,

    /// Port number where the server listens to [default: 8080]
    #[arg(long)]
    pub port: Option<u16>,

    /// YAML file with the same settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Cap on connections handled at once
    #[arg(long = "max_connections")]
    pub max_connections: Option<usize>,

    /// Give up on clients that take longer than this to send a request line
    #[arg(long = "read_timeout_ms")]
    pub read_timeout_ms: Option<u64>,
}

impl Cli {
    pub fn into_config(self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(root) = self.document_root {
            cfg.document_root = root;
        }
        if let Some(port) = self.port {
            cfg.port = port;
        }
        if let Some(max) = self.max_connections {
            cfg.limits.max_connections = Some(max);
        }
        if let Some(ms) = self.read_timeout_ms {
            cfg.limits.read_timeout_ms = Some(ms);
        }

        cfg.validate()?;
        Ok(cfg)
    }
}
