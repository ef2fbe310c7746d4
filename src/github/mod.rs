//! GitHub integration module
//!
//! Pull requests are opened through the GitHub CLI rather than the REST API,
//! so authentication stays with `gh`.

pub mod cli;

pub use cli::{CreatePrParams, PrCli};
