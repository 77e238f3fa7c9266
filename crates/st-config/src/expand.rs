//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Strings without `${` are returned unchanged, so a bare `$` (common in
/// tokens) is never interpreted.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Expand an optional field in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("ST_TEST_PRISMIC_REPO", "spacetraveling");
        }
        let result = expand_env(
            "https://${ST_TEST_PRISMIC_REPO}.cdn.prismic.io/api/v2",
            "content.endpoint",
        )
        .unwrap();
        assert_eq!(result, "https://spacetraveling.cdn.prismic.io/api/v2");
        unsafe {
            std::env::remove_var("ST_TEST_PRISMIC_REPO");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ST_UNSET_HOST");
        }
        let result = expand_env("${ST_UNSET_HOST:-0.0.0.0}", "server.host").unwrap();
        assert_eq!(result, "0.0.0.0");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ST_MISSING_TOKEN");
        }
        let err = expand_env("${ST_MISSING_TOKEN}", "content.access_token").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("ST_MISSING_TOKEN"));
        assert!(err.to_string().contains("content.access_token"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("tok$en", "content.access_token").unwrap();
        assert_eq!(result, "tok$en");
    }

    #[test]
    fn test_expand_opt() {
        let mut none = None;
        expand_opt(&mut none, "content.access_token").unwrap();
        assert_eq!(none, None);

        let mut literal = Some("abc".to_owned());
        expand_opt(&mut literal, "content.access_token").unwrap();
        assert_eq!(literal.as_deref(), Some("abc"));
    }
}
