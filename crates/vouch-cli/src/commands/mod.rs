//! CLI command implementations.
//!
//! `vouch issue` - Issue a new access token.
//! `vouch verify` - Check whether a token is currently valid.
//! `vouch inspect` - Show the claims carried by a token.

pub mod inspect;
pub mod issue;
pub mod verify;

use clap::ValueEnum;

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON
    Json,
    /// An HTTP header line (issue only; other commands fall back to text)
    Header,
}
