use crate::config::ConsoleConfig;
use crate::core::transport::DEFAULT_TIMEOUT_SECONDS;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "catalogue-admin")]
#[command(about = "Manage catalogue users and their device assignments")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:8080")]
    pub registry: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS, help = "Request timeout in seconds")]
    pub timeout: u64,

    #[arg(long, help = "TOML config file; overrides --registry and --timeout")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve a logical service name through the registry
    Resolve { service: String },
    /// List devices registered on the registry
    Devices,
    /// List users of the user catalogue
    Users,
    /// Create a user
    CreateUser { username: String, password: String },
    /// List devices assigned to a user
    UserDevices { user_id: String },
    /// Assign a device to a user
    Assign {
        user_id: String,
        device_id: String,
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Remove a device from a user
    Unassign { user_id: String, device_id: String },
}

impl CliConfig {
    pub fn console_config(&self) -> Result<ConsoleConfig> {
        match &self.config {
            Some(path) => ConsoleConfig::from_file(path),
            None => Ok(ConsoleConfig::new(self.registry.clone(), self.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assign_with_label() {
        let cli = CliConfig::try_parse_from([
            "catalogue-admin",
            "--registry",
            "http://catalogue:8080",
            "assign",
            "3",
            "d1",
            "--label",
            "Tank A",
        ])
        .unwrap();

        let config = cli.console_config().unwrap();
        assert_eq!(config.registry.base_url, "http://catalogue:8080");
        assert_eq!(config.http.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        match cli.command {
            Command::Assign {
                user_id,
                device_id,
                label,
            } => {
                assert_eq!(user_id, "3");
                assert_eq!(device_id, "d1");
                assert_eq!(label, "Tank A");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
