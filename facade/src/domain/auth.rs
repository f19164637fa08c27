//! Authorization-header handling for "current user" operations.
//!
//! Callers often hold a raw `Authorization` header rather than a bare access
//! token. These helpers peel the `Bearer` scheme off before a facade talks
//! to the provider.

use super::FacadeError;

const BEARER_SCHEME: &str = "Bearer";

/// Extract the token from `"Bearer <token>"` or a bare token.
///
/// The scheme match ignores ASCII case. An empty header yields an empty
/// string.
///
/// # Examples
/// ```
/// use idp_facade::domain::extract_bearer_token;
///
/// assert_eq!(extract_bearer_token("Bearer abc123"), "abc123");
/// assert_eq!(extract_bearer_token("abc123"), "abc123");
/// assert_eq!(extract_bearer_token(""), "");
/// ```
pub fn extract_bearer_token(header: &str) -> &str {
    let trimmed = header.trim();
    let Some((scheme, rest)) = trimmed.split_once(char::is_whitespace) else {
        return trimmed;
    };
    if scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        rest.trim()
    } else {
        trimmed
    }
}

/// Resolve an access token from an authorization header.
///
/// # Errors
///
/// Returns [`FacadeError::InvalidInput`] when the header holds no token, so
/// no remote call is attempted.
pub fn access_token_from_header(header: &str) -> Result<String, FacadeError> {
    let token = extract_bearer_token(header);
    if token.is_empty() {
        return Err(FacadeError::invalid_input(
            "authorization header does not contain an access token",
        ));
    }
    Ok(token.to_owned())
}
