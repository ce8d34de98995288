//! `vouch issue` - Issue a new access token.

use anyhow::Context;
use serde_json::{Map, Value, json};
use vouch_token::{AccessClaims, Role, SigningSecret, TokenIssuer};

use super::OutputFormat;

#[allow(clippy::too_many_arguments)]
pub fn run(
    secret: &SigningSecret,
    user_id: &str,
    company_id: &str,
    role: Role,
    expire_hours: i64,
    claims: Option<&str>,
    format: OutputFormat,
    header_name: &str,
) -> anyhow::Result<()> {
    let token = issue_token(secret, user_id, company_id, role, expire_hours, claims)?;

    match format {
        OutputFormat::Json => {
            let output = json!({
                "token": token,
                "user_id": user_id,
                "company_id": company_id,
                "role": role.as_str(),
                "expire_hours": expire_hours,
                "header": format!("Bearer {token}"),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        OutputFormat::Header => {
            println!("{header_name}: Bearer {token}");
        }

        OutputFormat::Text => {
            println!("✔ Issued access token");
            println!("  User ID: {user_id}");
            println!("  Company ID: {company_id}");
            println!("  Role: {}", role.as_str());
            println!("  Expires in: {expire_hours} hours");
            println!();
            println!("{token}");
            println!();
            println!("{header_name}: Bearer {token}");
        }
    }

    Ok(())
}

/// Build and sign the token. Split out so tests can capture the token string.
fn issue_token(
    secret: &SigningSecret,
    user_id: &str,
    company_id: &str,
    role: Role,
    expire_hours: i64,
    claims: Option<&str>,
) -> anyhow::Result<String> {
    let mut access = AccessClaims::new(user_id, company_id)
        .role(role.as_str())
        .lifetime_hours(expire_hours);

    if let Some(raw) = claims {
        let extra: Map<String, Value> =
            serde_json::from_str(raw).context("--claims must be a JSON object")?;
        access = access.claims(extra);
    }

    let issuer = TokenIssuer::new(secret)?;
    Ok(issuer.issue(access)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use vouch_token::TokenVerifier;

    fn secret() -> SigningSecret {
        SigningSecret::resolve(Some("cli-test-secret"), Path::new("/nonexistent/.env"))
    }

    #[test]
    fn test_issue_token_round_trip() {
        let secret = secret();
        let token =
            issue_token(&secret, "user-123", "company-456", Role::Admin, 1, None).unwrap();

        let claims = TokenVerifier::new(&secret).decode(&token).unwrap();
        assert_eq!(claims["user_id"], "user-123");
        assert_eq!(claims["company_id"], "company-456");
        assert_eq!(claims["role"], "admin");
    }

    #[test]
    fn test_additional_claims_overwrite() {
        let secret = secret();
        let token = issue_token(
            &secret,
            "u",
            "c",
            Role::SalesRep,
            24,
            Some(r#"{"role": "admin", "region": "emea"}"#),
        )
        .unwrap();

        let claims = TokenVerifier::new(&secret).decode(&token).unwrap();
        assert_eq!(claims["role"], "admin");
        assert_eq!(claims["region"], "emea");
    }

    #[test]
    fn test_claims_must_be_a_json_object() {
        let err = issue_token(
            &secret(),
            "u",
            "c",
            Role::SalesRep,
            24,
            Some(r#"["not", "an", "object"]"#),
        )
        .unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn test_run_prints_without_error() {
        let s = secret();
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Header] {
            run(&s, "u", "c", Role::SalesRep, 24, None, format, "Authorization").unwrap();
        }
    }
}
