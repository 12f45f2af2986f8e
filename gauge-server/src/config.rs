//! Server configuration from CLI arguments and environment variables.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the gauge server.
#[derive(Debug, Parser)]
#[command(name = "saorsa-gauge")]
#[command(about = "Local gauge rendering server")]
#[command(version)]
pub struct CliArgs {
    /// Port to listen on (localhost only)
    #[arg(long, env = "GAUGE_PORT", default_value = "9470")]
    pub port: u16,

    /// Directory where gauge documents are persisted as JSON
    #[arg(long, env = "GAUGE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Gauge document (JSON) loaded into the default slot at startup
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Runtime server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Optional persistence directory.
    pub data_dir: Option<PathBuf>,
    /// Optional startup gauge document.
    pub config: Option<PathBuf>,
}

impl From<CliArgs> for ServerConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            port: args.port,
            data_dir: args.data_dir,
            config: args.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["saorsa-gauge"]);
        let config = ServerConfig::from(args);
        assert_eq!(config.port, 9470);
        assert!(config.data_dir.is_none());
        assert!(config.config.is_none());
    }

    #[test]
    fn test_explicit_arguments() {
        let args = CliArgs::parse_from([
            "saorsa-gauge",
            "--port",
            "8123",
            "--data-dir",
            "/tmp/gauges",
            "--config",
            "accuracy.json",
        ]);
        let config = ServerConfig::from(args);
        assert_eq!(config.port, 8123);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/gauges")));
        assert_eq!(config.config, Some(PathBuf::from("accuracy.json")));
    }
}
