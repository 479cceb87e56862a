//! Bearer token creation and verification.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    api::models::users::{Identity, Role},
    config::Config,
    errors::Error,
    types::UserId,
};

/// Token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: UserId,   // Subject (user ID)
    pub email: String, // User email
    pub role: Role,    // Permission level at issuance
    pub exp: i64,      // Expiration time
    pub iat: i64,      // Issued at
}

impl TokenClaims {
    /// Create new claims for a freshly authenticated identity
    pub fn new(identity: &Identity, config: &Config) -> Self {
        let now = Utc::now();
        let exp = now + config.auth.security.jwt_expiry;

        Self {
            sub: identity.id,
            email: identity.email.clone(),
            role: identity.role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Create a signed token for an authenticated identity
pub fn issue_token(identity: &Identity, config: &Config) -> Result<String, Error> {
    let claims = TokenClaims::new(identity, config);
    let secret_key = config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "token issuance: secret_key is required".to_string(),
    })?;

    let key = EncodingKey::from_secret(secret_key.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| Error::Internal {
        operation: format!("create token: {e}"),
    })
}

/// Verify and decode a bearer token.
///
/// Only checks the token itself (signature, shape, expiry). The caller must
/// still re-fetch the user row and check `is_active` — claims say who the
/// token was issued to, not whether that account is still allowed in.
pub fn verify_token(token: &str, config: &Config) -> Result<TokenClaims, Error> {
    let secret_key = config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "token verification: secret_key is required".to_string(),
    })?;

    let key = DecodingKey::from_secret(secret_key.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<TokenClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        // Client errors (401) - malformed tokens, invalid claims, expired tokens
        jsonwebtoken::errors::ErrorKind::InvalidToken
        | jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::ExpiredSignature
        | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
        | jsonwebtoken::errors::ErrorKind::InvalidIssuer
        | jsonwebtoken::errors::ErrorKind::InvalidAudience
        | jsonwebtoken::errors::ErrorKind::InvalidSubject
        | jsonwebtoken::errors::ErrorKind::ImmatureSignature
        | jsonwebtoken::errors::ErrorKind::Base64(_)
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => Error::InvalidToken,

        // Server errors (500) - key issues, internal failures
        jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_)
        | jsonwebtoken::errors::ErrorKind::RsaFailedSigning
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithmName
        | jsonwebtoken::errors::ErrorKind::InvalidKeyFormat
        | jsonwebtoken::errors::ErrorKind::MissingAlgorithm
        | jsonwebtoken::errors::ErrorKind::Json(_)
        | jsonwebtoken::errors::ErrorKind::Utf8(_)
        | jsonwebtoken::errors::ErrorKind::Crypto(_) => Error::Internal {
            operation: format!("token verification: {e}"),
        },

        // Catch-all for any future error variants (default to server error for safety)
        _ => Error::Internal {
            operation: format!("token verification (unknown error): {e}"),
        },
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use uuid::Uuid;

    fn create_test_config() -> Config {
        let mut config = Config {
            secret_key: Some("test-secret-key-for-tokens".to_string()),
            ..Default::default()
        };
        config.auth.security.jwt_expiry = Duration::from_secs(3600); // 1 hour
        config
    }

    fn create_test_identity() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            role: Role::AdminEkonomi,
            full_name: Some("Test User".to_string()),
            is_active: true,
        }
    }

    #[test]
    fn test_issue_and_verify_token() {
        let config = create_test_config();
        let identity = create_test_identity();

        // Create token
        let token = issue_token(&identity, &config).unwrap();
        assert!(!token.is_empty());

        // Verify token
        let claims = verify_token(&token, &config).unwrap();

        // Check claims match
        assert_eq!(claims.sub, identity.id);
        assert_eq!(claims.email, identity.email);
        assert_eq!(claims.role, identity.role);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_invalid_token() {
        let config = create_test_config();

        let result = verify_token("invalid.token.here", &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let mut config = create_test_config();
        let identity = create_test_identity();

        // Create token with one secret
        let token = issue_token(&identity, &config).unwrap();

        // Try to verify with different secret
        config.secret_key = Some("different-secret".to_string());
        let result = verify_token(&token, &config);
        assert!(result.is_err());
        // Should be InvalidToken (InvalidSignature), not Internal error
        assert!(matches!(result.unwrap_err(), Error::InvalidToken));
    }

    #[test]
    fn test_verify_expired_token() {
        let config = create_test_config();
        let identity = create_test_identity();

        // Manually create an expired token by setting exp in the past
        let now = Utc::now();
        let claims = TokenClaims {
            sub: identity.id,
            email: identity.email.clone(),
            role: identity.role,
            exp: (now - chrono::Duration::seconds(3600)).timestamp(), // 1 hour ago
            iat: now.timestamp(),
        };

        let secret_key = config.secret_key.as_ref().unwrap();
        let key = EncodingKey::from_secret(secret_key.as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();

        let result = verify_token(&token, &config);
        assert!(result.is_err());
        // Should be InvalidToken (ExpiredSignature), not Internal error
        assert!(matches!(result.unwrap_err(), Error::InvalidToken));
    }

    #[test]
    fn test_verify_malformed_token() {
        let config = create_test_config();

        // Test various malformed tokens
        let malformed_tokens = vec!["not.a.token", "invalid", "", "too.many.parts.in.this.token"];

        for token in malformed_tokens {
            let result = verify_token(token, &config);
            assert!(result.is_err());
            // Should be InvalidToken (InvalidToken/Base64), not Internal error
            assert!(
                matches!(result.unwrap_err(), Error::InvalidToken),
                "Expected InvalidToken error for token: {}",
                token
            );
        }
    }
}
