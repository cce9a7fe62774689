use crate::error::{ConfigError, parse_or};

/// 24 hours.
pub const DEFAULT_TOKEN_EXPIRY: i64 = 86_400;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_seconds: i64,
}

impl JwtConfig {
    /// Loads the signing configuration. `JWT_SECRET` has no fallback: an unset
    /// or blank secret is an error and the server refuses to start.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let expiry_seconds = parse_or(&lookup, "JWT_EXPIRY", DEFAULT_TOKEN_EXPIRY)?;
        if expiry_seconds <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY",
                value: expiry_seconds.to_string(),
            });
        }

        Ok(Self {
            secret,
            expiry_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let result = JwtConfig::from_vars(vars(&[]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_blank_secret_is_an_error() {
        let result = JwtConfig::from_vars(vars(&[("JWT_SECRET", "   ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_expiry_is_one_day() {
        let config = JwtConfig::from_vars(vars(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.expiry_seconds, 86_400);
    }

    #[test]
    fn test_custom_expiry() {
        let config =
            JwtConfig::from_vars(vars(&[("JWT_SECRET", "s3cret"), ("JWT_EXPIRY", "600")]))
                .unwrap();
        assert_eq!(config.expiry_seconds, 600);
    }

    #[test]
    fn test_invalid_expiry() {
        let result = JwtConfig::from_vars(vars(&[("JWT_SECRET", "s3cret"), ("JWT_EXPIRY", "soon")]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                var: "JWT_EXPIRY",
                ..
            })
        ));

        let result = JwtConfig::from_vars(vars(&[("JWT_SECRET", "s3cret"), ("JWT_EXPIRY", "0")]));
        assert!(result.is_err());
    }
}
