//! Claim construction for access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A decoded token payload: claim name to JSON value.
pub type ClaimSet = Map<String, Value>;

/// Value of the `type` claim stamped on every issued token.
pub const TYPE_ACCESS: &str = "access";

/// Roles understood by the application.
///
/// The issuance path accepts free-form role strings; this enum exists for
/// callers (the CLI argument parser among them) that want to validate against
/// the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    SalesRep,
    CustomerRep,
    SalesManager,
    Admin,
}

impl Role {
    /// The role's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SalesRep => "sales_rep",
            Role::CustomerRep => "customer_rep",
            Role::SalesManager => "sales_manager",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role string is not one of the known roles.
#[derive(Debug, Error)]
#[error("unknown role '{0}', expected one of: sales_rep, customer_rep, sales_manager, admin")]
pub struct UnknownRole(String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales_rep" => Ok(Role::SalesRep),
            "customer_rep" => Ok(Role::CustomerRep),
            "sales_manager" => Ok(Role::SalesManager),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Builder for the claim set of a new access token.
#[derive(Debug, Clone)]
pub struct AccessClaims {
    user_id: String,
    company_id: String,
    role: String,
    lifetime_hours: i64,
    extra: Map<String, Value>,
}

impl AccessClaims {
    /// Start a claim set for the given user and company.
    ///
    /// Defaults: role `sales_rep`, lifetime 24 hours.
    pub fn new(user_id: impl Into<String>, company_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            company_id: company_id.into(),
            role: Role::default().as_str().to_string(),
            lifetime_hours: 24,
            extra: Map::new(),
        }
    }

    /// Set the role. Free-form; validation against [`Role`] is a caller
    /// concern.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Set the token lifetime in hours.
    ///
    /// The arithmetic is unguarded: a zero or negative value produces a token
    /// that is already expired at issuance.
    pub fn lifetime_hours(mut self, hours: i64) -> Self {
        self.lifetime_hours = hours;
        self
    }

    /// Add a single additional claim.
    pub fn claim(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Merge a map of additional claims.
    ///
    /// Additional claims are applied after the built-in ones, so on key
    /// collision the additional value wins, reserved names included.
    pub fn claims(mut self, claims: Map<String, Value>) -> Self {
        self.extra.extend(claims);
        self
    }

    /// Assemble the payload for a token issued at `now`.
    pub(crate) fn into_payload(self, now: DateTime<Utc>) -> ClaimSet {
        let iat = now.timestamp();
        let exp = iat + self.lifetime_hours * 3600;

        let mut payload = Map::new();
        payload.insert("user_id".into(), Value::String(self.user_id));
        payload.insert("company_id".into(), Value::String(self.company_id));
        payload.insert("role".into(), Value::String(self.role));
        payload.insert("exp".into(), Value::from(exp));
        payload.insert("iat".into(), Value::from(iat));
        payload.insert("type".into(), Value::String(TYPE_ACCESS.into()));

        // Additional claims merge last so they can overwrite reserved names.
        for (name, value) in self.extra {
            payload.insert(name, value);
        }
        payload
    }
}
