//! Command execution context
//!
//! Builds the API client once from the global options so command handlers
//! start from a ready client.

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::TestRailClient;
use crate::error::Result;

/// Context for command execution: the API client and output preference.
pub struct CommandContext {
    pub client: TestRailClient,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns a configuration error when host, user or password is not set.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let server = opts.server_config()?;
        log::debug!("Using TestRail at {}", server.base_url());
        let client = TestRailClient::new(&server)?;

        Ok(Self {
            client,
            format: opts.format,
        })
    }
}
