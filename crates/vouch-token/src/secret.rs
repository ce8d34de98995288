//! Signing secret resolution.
//!
//! The secret is resolved once, from the highest-priority source available:
//! an explicit value, the env file, the process environment, then a fixed
//! fallback. Empty values are treated as absent at every tier.

use std::collections::HashMap;
use std::env;
use std::path::Path;

/// Env-file and environment key holding the signing secret.
pub const SECRET_ENV_VAR: &str = "JWT_SECRET_KEY";

/// Fallback used when no other source provides a secret. Not a secret;
/// deployments are expected to configure one of the higher tiers.
pub const DEFAULT_SECRET: &str = "default-secret-key";

/// Which tier of the resolution chain produced the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretOrigin {
    Explicit,
    EnvFile,
    Environment,
    Fallback,
}

impl SecretOrigin {
    pub fn describe(&self) -> &'static str {
        match self {
            SecretOrigin::Explicit => "explicit value",
            SecretOrigin::EnvFile => "env file",
            SecretOrigin::Environment => "process environment",
            SecretOrigin::Fallback => "built-in fallback",
        }
    }
}

/// A resolved symmetric signing secret. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct SigningSecret {
    value: String,
    origin: SecretOrigin,
}

impl SigningSecret {
    /// Resolve the secret from an optional explicit value and an env file.
    ///
    /// A missing env file is not an error; that tier is simply skipped.
    pub fn resolve(explicit: Option<&str>, env_file: &Path) -> Self {
        let file_vars = load_env_file(env_file);
        let secret = Self::resolve_from(explicit, &file_vars, |key| env::var(key).ok());
        tracing::debug!(
            origin = secret.origin.describe(),
            env_file = %env_file.display(),
            "resolved signing secret"
        );
        secret
    }

    /// Resolution chain with the process-environment lookup injected, so tests
    /// can exercise every tier without touching global state.
    fn resolve_from(
        explicit: Option<&str>,
        file_vars: &HashMap<String, String>,
        env_lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        if let Some(value) = explicit.filter(|v| !v.is_empty()) {
            return Self {
                value: value.to_string(),
                origin: SecretOrigin::Explicit,
            };
        }
        if let Some(value) = file_vars.get(SECRET_ENV_VAR).filter(|v| !v.is_empty()) {
            return Self {
                value: value.clone(),
                origin: SecretOrigin::EnvFile,
            };
        }
        if let Some(value) = env_lookup(SECRET_ENV_VAR).filter(|v| !v.is_empty()) {
            return Self {
                value,
                origin: SecretOrigin::Environment,
            };
        }
        Self {
            value: DEFAULT_SECRET.to_string(),
            origin: SecretOrigin::Fallback,
        }
    }

    /// The tier the secret came from.
    pub fn origin(&self) -> SecretOrigin {
        self.origin
    }

    /// Key bytes for HMAC signing.
    pub fn as_bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }
}

/// Read `KEY=VALUE` pairs from an env file.
///
/// Missing files yield an empty map. Blank lines and `#` comments are
/// skipped, as are lines dotenvy cannot parse.
fn load_env_file(path: &Path) -> HashMap<String, String> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => iter.flatten().collect(),
        Err(_) => HashMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn file_vars(value: &str) -> HashMap<String, String> {
        HashMap::from([(SECRET_ENV_VAR.to_string(), value.to_string())])
    }

    #[test]
    fn test_explicit_wins_over_all_tiers() {
        let secret = SigningSecret::resolve_from(Some("explicit"), &file_vars("from-file"), |_| {
            Some("from-env".to_string())
        });
        assert_eq!(secret.as_bytes(), b"explicit");
        assert_eq!(secret.origin(), SecretOrigin::Explicit);
    }

    #[test]
    fn test_file_wins_over_environment() {
        let secret = SigningSecret::resolve_from(None, &file_vars("from-file"), |_| {
            Some("from-env".to_string())
        });
        assert_eq!(secret.as_bytes(), b"from-file");
        assert_eq!(secret.origin(), SecretOrigin::EnvFile);
    }

    #[test]
    fn test_environment_wins_over_fallback() {
        let secret = SigningSecret::resolve_from(None, &HashMap::new(), |key| {
            (key == SECRET_ENV_VAR).then(|| "from-env".to_string())
        });
        assert_eq!(secret.as_bytes(), b"from-env");
        assert_eq!(secret.origin(), SecretOrigin::Environment);
    }

    #[test]
    fn test_fallback_when_nothing_is_set() {
        let secret = SigningSecret::resolve_from(None, &HashMap::new(), no_env);
        assert_eq!(secret.as_bytes(), DEFAULT_SECRET.as_bytes());
        assert_eq!(secret.origin(), SecretOrigin::Fallback);
    }

    #[test]
    fn test_empty_values_are_treated_as_absent() {
        let secret = SigningSecret::resolve_from(Some(""), &file_vars(""), |_| {
            Some(String::new())
        });
        assert_eq!(secret.origin(), SecretOrigin::Fallback);
    }

    #[test]
    fn test_load_env_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# comment line").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "JWT_SECRET_KEY=hunter2").unwrap();
        writeln!(file, "OTHER=value").unwrap();

        let vars = load_env_file(file.path());
        assert_eq!(vars.get(SECRET_ENV_VAR).map(String::as_str), Some("hunter2"));
        assert_eq!(vars.get("OTHER").map(String::as_str), Some("value"));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_missing_env_file_is_empty() {
        let vars = load_env_file(Path::new("/nonexistent/.env"));
        assert!(vars.is_empty());
    }

    #[test]
    fn test_resolve_with_env_file_on_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "JWT_SECRET_KEY=disk-secret").unwrap();

        let secret = SigningSecret::resolve(None, file.path());
        assert_eq!(secret.as_bytes(), b"disk-secret");
        assert_eq!(secret.origin(), SecretOrigin::EnvFile);
    }
}
