//! API token resolution
//!
//! Order: `--token` flag, then `CLOUDFLARE_API_TOKEN`, then a masked prompt.
//! Values are trimmed; blank values count as absent.

use cfdns_core::{Error, Result};

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";

const PROMPT: &str = "Enter Cloudflare API token: ";

/// Resolve the token from the flag, the environment, or an interactive prompt
pub fn resolve(flag: Option<&str>) -> Result<String> {
    resolve_with(flag, std::env::var(TOKEN_ENV).ok(), || {
        rpassword::prompt_password(PROMPT)
    })
}

/// Resolution chain with the environment value and prompt injected
pub fn resolve_with<P>(flag: Option<&str>, env_value: Option<String>, prompt: P) -> Result<String>
where
    P: FnOnce() -> std::io::Result<String>,
{
    if let Some(token) = non_blank(flag) {
        tracing::debug!("Using API token from --token");
        return Ok(token);
    }

    if let Some(token) = non_blank(env_value.as_deref()) {
        tracing::debug!("Using API token from {}", TOKEN_ENV);
        return Ok(token);
    }

    let entered = prompt()
        .map_err(|e| Error::invalid_input(format!("Cloudflare API token required; prompt failed: {}", e)))?;

    non_blank(Some(&entered)).ok_or_else(|| Error::invalid_input("Cloudflare API token required"))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_prompt() -> std::io::Result<String> {
        panic!("prompt must not be reached")
    }

    #[test]
    fn flag_wins_over_environment() {
        let token = resolve_with(Some(" flag-token "), Some("env-token".into()), no_prompt).unwrap();
        assert_eq!(token, "flag-token");
    }

    #[test]
    fn environment_used_when_flag_absent() {
        let token = resolve_with(None, Some("env-token\n".into()), no_prompt).unwrap();
        assert_eq!(token, "env-token");
    }

    #[test]
    fn blank_values_fall_through_to_prompt() {
        let token = resolve_with(Some("  "), Some(String::new()), || Ok("typed".into())).unwrap();
        assert_eq!(token, "typed");
    }

    #[test]
    fn empty_prompt_is_input_error() {
        let err = resolve_with(None, None, || Ok("   ".into())).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn failed_prompt_is_input_error() {
        let err = resolve_with(None, None, || {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no tty"))
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
