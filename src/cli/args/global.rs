//! Global CLI options shared across all commands
//!
//! Consolidates the connection flags and output format into one struct so
//! handlers take a single parameter.

use crate::cli::{Cli, OutputFormat};
use crate::config::{Scheme, ServerConfig};
use crate::error::ConfigError;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable (`TESTRAIL_*`) > default. There is no
/// config file.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// TestRail host, optionally with a port
    pub host: Option<String>,

    /// TestRail user
    pub user: Option<String>,

    /// Password or API key
    pub password: Option<String>,

    /// http or https
    pub scheme: Scheme,

    /// Serve the API from the host root instead of `/testrail/`
    pub hosted: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            host: cli.host.clone(),
            user: cli.user.clone(),
            password: cli.password.clone(),
            scheme: cli.scheme,
            hosted: cli.hosted,
        }
    }

    /// Server settings for API commands; every credential must be set.
    pub fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        let host = self
            .host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or(ConfigError::MissingCredentials("host", "HOST"))?;
        let user = self
            .user
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(ConfigError::MissingCredentials("user", "USER"))?;
        let password = self
            .password
            .as_deref()
            .ok_or(ConfigError::MissingCredentials("password", "PASSWORD"))?;

        Ok(ServerConfig::new(host, user, password, self.scheme).with_hosted(self.hosted))
    }
}
