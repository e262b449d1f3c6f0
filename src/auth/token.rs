// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuing and verification.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret loaded at
//! start-up. Issuing is stateless; verification depends only on the secret
//! and the current time.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use super::{AuthError, AuthenticatedUser, Claims};

/// Token lifetime from issuance.
pub const TOKEN_LIFETIME_DAYS: i64 = 365;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_aud = false;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `email`, valid for [`TOKEN_LIFETIME_DAYS`].
    pub fn issue(&self, email: &str) -> Result<String, AuthError> {
        self.issue_at(email, Utc::now())
    }

    /// Issue a token as if signed at `issued_at`.
    pub fn issue_at(&self, email: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        if email.is_empty() {
            return Err(AuthError::EmptyEmail);
        }

        let claims = Claims {
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + TimeDelta::days(TOKEN_LIFETIME_DAYS)).timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(|e| AuthError::InternalError(format!("JWT encode failed: {e}")))
    }

    /// Check signature and expiry and return the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })
    }

    /// Verify an `Authorization` header value.
    ///
    /// `None` is [`AuthError::MissingAuthHeader`]; anything else that does not
    /// yield valid claims is one of the 403 variants.
    pub fn verify(&self, authorization: Option<&str>) -> Result<AuthenticatedUser, AuthError> {
        let header = authorization.ok_or(AuthError::MissingAuthHeader)?;
        let token = bearer_token(header)?;
        let claims = self.decode(token)?;
        Ok(AuthenticatedUser::from_claims(claims))
    }
}

/// Extract the token from `Bearer <token>`.
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidAuthHeader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    fn keys() -> TokenKeys {
        TokenKeys::from_secret(b"test-secret")
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    /// Swap the payload of a signed token, keeping its signature.
    fn tamper(token: &str, email: &str) -> String {
        let parts: Vec<&str> = token.split('.').collect();
        let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let mut claims: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        claims["email"] = serde_json::Value::from(email);
        let forged = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        format!("{}.{}.{}", parts[0], forged, parts[2])
    }

    #[test]
    fn issued_token_verifies_to_same_email() {
        let keys = keys();
        for email in ["a@x.com", "captain@club.org", "ünï@x.com"] {
            let token = keys.issue(email).unwrap();
            let user = keys.verify(Some(&bearer(&token))).unwrap();
            assert_eq!(user.email, email);
        }
    }

    #[test]
    fn token_lives_for_365_days() {
        let keys = keys();
        let issued_at = Utc::now();
        let token = keys.issue_at("a@x.com", issued_at).unwrap();
        let claims = keys.decode(&token).unwrap();

        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 365 * 24 * 60 * 60);
    }

    #[test]
    fn empty_email_is_rejected() {
        assert!(matches!(keys().issue(""), Err(AuthError::EmptyEmail)));
    }

    #[test]
    fn missing_header_is_auth_missing() {
        assert!(matches!(keys().verify(None), Err(AuthError::MissingAuthHeader)));
    }

    #[test]
    fn non_bearer_header_is_invalid() {
        let keys = keys();
        let token = keys.issue("a@x.com").unwrap();

        for header in [format!("Basic {token}"), token.clone(), "Bearer ".to_string()] {
            let err = keys.verify(Some(&header)).unwrap_err();
            assert!(matches!(err, AuthError::InvalidAuthHeader), "{header}: {err:?}");
        }
    }

    #[test]
    fn tampered_token_is_rejected() {
        let keys = keys();
        let token = keys.issue("member@x.com").unwrap();
        let forged = tamper(&token, "boss@x.com");

        let err = keys.verify(Some(&bearer(&forged))).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = TokenKeys::from_secret(b"other-secret").issue("a@x.com").unwrap();
        assert!(matches!(
            keys().verify(Some(&bearer(&token))),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = keys();
        let issued_at = Utc::now() - TimeDelta::days(TOKEN_LIFETIME_DAYS + 1);
        let token = keys.issue_at("a@x.com", issued_at).unwrap();

        let err = keys.verify(Some(&bearer(&token))).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn token_near_end_of_life_still_verifies() {
        let keys = keys();
        let issued_at = Utc::now() - TimeDelta::days(TOKEN_LIFETIME_DAYS) + TimeDelta::hours(1);
        let token = keys.issue_at("a@x.com", issued_at).unwrap();
        assert!(keys.verify(Some(&bearer(&token))).is_ok());
    }

    #[test]
    fn garbage_token_is_malformed() {
        assert!(matches!(
            keys().verify(Some("Bearer not.a.jwt")),
            Err(AuthError::MalformedToken)
        ));
    }
}
