//! Token issuance and verification.

use crate::claims::{AccessClaims, ClaimSet};
use crate::error::TokenError;
use crate::secret::SigningSecret;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use serde_json::Map;

/// Issues signed access tokens.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    header: Header,
}

impl TokenIssuer {
    /// Create an issuer for the given secret.
    ///
    /// Probes the signing backend with a throwaway payload so a broken
    /// configuration surfaces here rather than at the first issuance.
    pub fn new(secret: &SigningSecret) -> Result<Self, TokenError> {
        let issuer = Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            header: Header::new(Algorithm::HS256),
        };

        jsonwebtoken::encode(&issuer.header, &Map::new(), &issuer.encoding_key)
            .map_err(|e| TokenError::Configuration(e.to_string()))?;

        Ok(issuer)
    }

    /// Sign a claim set, stamping it with the current time.
    pub fn issue(&self, claims: AccessClaims) -> Result<String, TokenError> {
        self.issue_at(claims, Utc::now())
    }

    /// Sign a claim set as if issued at `now`.
    pub fn issue_at(
        &self,
        claims: AccessClaims,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let payload = claims.into_payload(now);
        jsonwebtoken::encode(&self.header, &payload, &self.encoding_key)
            .map_err(TokenError::Signing)
    }
}

/// Verifies and decodes access tokens.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for the given secret.
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is required by default; disable the clock-skew allowance so a
        // token is invalid the moment its window passes.
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Whether the token decodes cleanly and is unexpired.
    ///
    /// Collapses expiry and every other failure into `false`; callers that
    /// need the distinction use [`decode`](Self::decode) or
    /// [`inspect`](Self::inspect).
    pub fn verify(&self, token: &str) -> bool {
        self.decode(token).is_ok()
    }

    /// Decode a token into its claim set, checking signature and expiry.
    pub fn decode(&self, token: &str) -> Result<ClaimSet, TokenError> {
        jsonwebtoken::decode::<ClaimSet>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from_decode)
    }

    /// Project a token into a human-readable info record.
    ///
    /// Never fails; decode errors are carried in the `error` field.
    pub fn inspect(&self, token: &str) -> TokenInfo {
        match self.decode(token) {
            Ok(claims) => TokenInfo::from_claims(&claims),
            Err(e) => TokenInfo::invalid(e.to_string()),
        }
    }
}

/// Human-readable projection of a token's standard claims.
#[derive(Debug, Clone, Serialize)]
pub struct TokenInfo {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TokenInfo {
    fn from_claims(claims: &ClaimSet) -> Self {
        Self {
            valid: true,
            user_id: string_claim(claims, "user_id"),
            company_id: string_claim(claims, "company_id"),
            role: string_claim(claims, "role"),
            issued_at: timestamp_claim(claims, "iat"),
            expires_at: timestamp_claim(claims, "exp"),
            token_type: string_claim(claims, "type"),
            error: None,
        }
    }

    fn invalid(error: String) -> Self {
        Self {
            valid: false,
            user_id: None,
            company_id: None,
            role: None,
            issued_at: None,
            expires_at: None,
            token_type: None,
            error: Some(error),
        }
    }
}

fn string_claim(claims: &ClaimSet, name: &str) -> Option<String> {
    claims.get(name).and_then(|v| v.as_str()).map(str::to_owned)
}

fn timestamp_claim(claims: &ClaimSet, name: &str) -> Option<String> {
    claims
        .get(name)
        .and_then(|v| v.as_i64())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339())
}
