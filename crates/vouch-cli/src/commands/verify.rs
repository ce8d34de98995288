//! `vouch verify` - Check whether a token is currently valid.

use serde_json::json;
use vouch_token::{SigningSecret, TokenVerifier};

use super::OutputFormat;

/// Prints validity and always exits cleanly: the result is output, not an
/// error, and expiry is indistinguishable from tampering here.
pub fn run(secret: &SigningSecret, token: &str, format: OutputFormat) -> anyhow::Result<()> {
    let valid = TokenVerifier::new(secret).verify(token);

    match format {
        OutputFormat::Json => println!("{}", json!({ "valid": valid })),
        _ => println!("Token is {}", if valid { "valid" } else { "invalid" }),
    }

    Ok(())
}
