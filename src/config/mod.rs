//! Connection and component configuration
//!
//! Listener and pre-run filter arguments arrive as one positional string,
//! colon-delimited the way test runners hand arguments to their plugins:
//!
//! ```text
//! listener: host:user:password:run_id[:scheme[:flag...]]
//! pre-run:  host:user:password:run_id:scheme:results_depth[:status...]
//! ```
//!
//! When the string contains a `;`, it is split on `;` instead, so hosts with
//! a port (`localhost:8080`) or passwords with colons can be passed.

use std::fmt;
use std::str::FromStr;

use crate::client::models::RunId;
use crate::error::ConfigError;

/// Protocol used to reach the TestRail server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl FromStr for Scheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            _ => Err(ConfigError::InvalidScheme(s.to_string())),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Https => write!(f, "https"),
        }
    }
}

/// TestRail server address and credentials.
///
/// Held in memory for the lifetime of the client; never written anywhere.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host name, optionally with a port
    pub host: String,
    /// TestRail user (usually an email address)
    pub user: String,
    /// Password or API key
    pub password: String,
    /// http or https
    pub scheme: Scheme,
    /// Hosted instances serve the API from the host root instead of `/testrail/`
    pub hosted: bool,
}

impl ServerConfig {
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        scheme: Scheme,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            scheme,
            hosted: false,
        }
    }

    pub fn with_hosted(mut self, hosted: bool) -> Self {
        self.hosted = hosted;
        self
    }

    /// Base URL every endpoint path is appended to.
    pub fn base_url(&self) -> String {
        let prefix = if self.hosted { "" } else { "testrail/" };
        format!(
            "{}://{}/{}index.php?/api/v2/",
            self.scheme,
            self.host.trim_end_matches('/'),
            prefix
        )
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"********")
            .field("scheme", &self.scheme)
            .field("hosted", &self.hosted)
            .finish()
    }
}

/// Settings of the result-reporting listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    pub server: ServerConfig,
    /// Run that receives the results
    pub run_id: RunId,
    /// Overwrite case title, description and references from the test
    pub update: bool,
    /// Keep a non-pass/non-fail previous status when a test fails again
    pub juggler: bool,
}

impl FromStr for ListenerConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let args = split_args(s);
        let (host, user, password) = credentials(&args)?;
        let run_id = parse_run_id(required(&args, 3, "run_id")?)?;
        let scheme = match args.get(4).filter(|s| !s.is_empty()) {
            Some(s) => s.parse()?,
            None => Scheme::Http,
        };

        let mut config = Self {
            server: ServerConfig::new(host, user, password, scheme),
            run_id,
            update: false,
            juggler: false,
        };

        for flag in args.iter().skip(5).filter(|f| !f.is_empty()) {
            match flag.to_ascii_lowercase().as_str() {
                "update" => config.update = true,
                "juggler" => config.juggler = true,
                "hosted" => config.server.hosted = true,
                _ => return Err(ConfigError::UnknownFlag(flag.to_string())),
            }
        }

        Ok(config)
    }
}

/// Settings of the pre-run filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRunConfig {
    pub server: ServerConfig,
    /// Run whose cases decide what executes
    pub run_id: RunId,
    /// Levels of nested sub-runs to traverse; 0 keeps to the run itself
    pub results_depth: u32,
    /// Status labels to keep; empty keeps every case of the run
    pub statuses: Vec<String>,
}

impl FromStr for PreRunConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let args = split_args(s);
        let (host, user, password) = credentials(&args)?;
        let run_id = parse_run_id(required(&args, 3, "run_id")?)?;
        let scheme: Scheme = required(&args, 4, "scheme")?.parse()?;
        let depth = required(&args, 5, "results_depth")?;
        let results_depth = depth
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidDepth(depth.to_string()))?;

        let statuses = args
            .iter()
            .skip(6)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            server: ServerConfig::new(host, user, password, scheme),
            run_id,
            results_depth,
            statuses,
        })
    }
}

fn split_args(s: &str) -> Vec<&str> {
    let separator = if s.contains(';') { ';' } else { ':' };
    s.split(separator).collect()
}

fn required<'a>(args: &[&'a str], index: usize, name: &'static str) -> Result<&'a str, ConfigError> {
    args.get(index)
        .copied()
        .filter(|s| !s.trim().is_empty())
        .ok_or(ConfigError::MissingArgument(name))
}

fn credentials<'a>(args: &[&'a str]) -> Result<(&'a str, &'a str, &'a str), ConfigError> {
    let host = required(args, 0, "host")?;
    let user = required(args, 1, "user")?;
    // An empty password is allowed, a missing one is not.
    let password = args
        .get(2)
        .copied()
        .ok_or(ConfigError::MissingArgument("password"))?;
    Ok((host, user, password))
}

fn parse_run_id(raw: &str) -> Result<RunId, ConfigError> {
    match raw.trim().parse::<RunId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ConfigError::InvalidRunId(raw.to_string())),
    }
}
