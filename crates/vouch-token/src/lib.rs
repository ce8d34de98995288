//! # vouch-token
//!
//! Access token issuance and verification for multi-tenant applications.
//!
//! This crate provides functionality for:
//! - Resolving the symmetric signing secret through a fixed priority chain
//! - Building claim sets that bind a user, company, and role
//! - Issuing time-bounded HS256 tokens
//! - Verifying, decoding, and inspecting tokens
//!
//! ## Token model
//!
//! A token is a standard JWS compact serialization signed with HMAC-SHA-256,
//! so anything that speaks HS256 JWTs can verify it. Tokens are stateless:
//! validity is fully determined by the token's own content, the current time,
//! and the secret. Nothing is stored at issuance and nothing can be revoked;
//! a token simply stops verifying once its expiry passes.
//!
//! ## Secret resolution
//!
//! The signing secret is resolved once, from the highest-priority source
//! available: an explicit value, the `JWT_SECRET_KEY` entry of an env file,
//! the process environment, then a built-in fallback. It is immutable for the
//! life of the issuer and verifier built from it.

pub mod claims;
pub mod error;
pub mod secret;
pub mod token;

pub use claims::{AccessClaims, ClaimSet, Role, UnknownRole};
pub use error::TokenError;
pub use secret::{DEFAULT_SECRET, SECRET_ENV_VAR, SecretOrigin, SigningSecret};
pub use token::{TokenInfo, TokenIssuer, TokenVerifier};
