//! Bearer Credential Extraction
//!
//! Parses `Authorization: Bearer <token>` request headers.

use http::{HeaderMap, header};
use thiserror::Error;

/// Why no bearer token could be read from a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Authorization header must use the Bearer scheme")]
    InvalidScheme,
}

/// Extract the bearer token from the `Authorization` header.
///
/// The scheme name is matched case-insensitively (RFC 7235); the token
/// itself is returned as-is.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::InvalidScheme)?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(BearerError::InvalidScheme)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(BearerError::InvalidScheme);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer(&headers("bearer   abc")), Ok("abc"));
    }

    #[test]
    fn test_extract_bearer_missing() {
        assert_eq!(extract_bearer(&HeaderMap::new()), Err(BearerError::Missing));
    }

    #[test]
    fn test_extract_bearer_wrong_scheme() {
        assert_eq!(
            extract_bearer(&headers("Basic dXNlcjpwYXNz")),
            Err(BearerError::InvalidScheme)
        );
        assert_eq!(extract_bearer(&headers("Bearer")), Err(BearerError::InvalidScheme));
        assert_eq!(extract_bearer(&headers("Bearer   ")), Err(BearerError::InvalidScheme));
    }
}
