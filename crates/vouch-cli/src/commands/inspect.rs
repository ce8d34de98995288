//! `vouch inspect` - Show the claims carried by a token.

use vouch_token::{SigningSecret, TokenInfo, TokenVerifier};

use super::OutputFormat;

/// Prints the projected info record. Decode failures land in the record's
/// `error` field rather than failing the command.
pub fn run(secret: &SigningSecret, token: &str, format: OutputFormat) -> anyhow::Result<()> {
    let info = TokenVerifier::new(secret).inspect(token);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
        _ => print_text(&info),
    }

    Ok(())
}

fn print_text(info: &TokenInfo) {
    println!("Token Information:");
    println!("  valid: {}", info.valid);
    for (name, value) in [
        ("user_id", &info.user_id),
        ("company_id", &info.company_id),
        ("role", &info.role),
        ("issued_at", &info.issued_at),
        ("expires_at", &info.expires_at),
        ("type", &info.token_type),
        ("error", &info.error),
    ] {
        if let Some(value) = value {
            println!("  {name}: {value}");
        }
    }
}
