//! testrail-bridge: connects test runners with TestRail
//!
//! - [`client`]: typed async client for TestRail's REST API v2
//! - [`listener`]: reports each finished test as a result in a run
//! - [`prerun`]: keeps only the tests whose cases are in a run
//!
//! Listener and filter are configured from the colon-delimited argument
//! strings test runners pass to their plugins (see [`config`]).

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod listener;
pub mod output;
pub mod prerun;
pub mod runner;
pub mod tags;

pub use error::{Error, Result};
