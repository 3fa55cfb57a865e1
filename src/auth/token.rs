// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 token issuing and verification.
//!
//! The signing key is fixed for the lifetime of the process, so a
//! [`TokenIssuer`] is shared behind an `Arc` without any locking.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use super::{claims::Claims, AuthError};

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Option<TimeDelta>,
}

impl TokenIssuer {
    /// Create an issuer for `secret`.
    ///
    /// With `ttl` set, tokens carry an `exp` claim and verification requires
    /// it. With `ttl` unset, tokens never expire.
    pub fn new(secret: &[u8], ttl: Option<TimeDelta>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_aud = false;

        if ttl.is_some() {
            validation.set_required_spec_claims(&["exp", "sub"]);
        } else {
            validation.validate_exp = false;
            validation.set_required_spec_claims(&["sub"]);
        }

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Sign a fresh token for `identity`.
    pub fn issue(&self, identity: &str) -> Result<String, AuthError> {
        let claims = Claims::new(identity, Utc::now(), self.ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Encoding(format!("failed to sign token: {e}")))
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    const SECRET: &[u8] = b"test-signing-key";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, Some(TimeDelta::hours(1)))
    }

    fn replace_segment(token: &str, index: usize, segment: &str) -> String {
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[index] = segment;
        parts.join(".")
    }

    #[test]
    fn issued_token_verifies() {
        let issuer = issuer();
        let token = issuer.issue("alice").unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.identity(), "alice");
        assert!(claims.exp.is_some());
    }

    #[test]
    fn altered_signature_is_rejected() {
        let issuer = issuer();
        let token = issuer.issue("alice").unwrap();
        let signature = token.rsplit('.').next().unwrap();
        let forged = URL_SAFE_NO_PAD.encode(b"definitely not the real signature");
        assert_ne!(signature, forged);

        let result = issuer.verify(&replace_segment(&token, 2, &forged));
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn altered_payload_is_rejected() {
        let issuer = issuer();
        let token = issuer.issue("alice").unwrap();
        let payload = format!(
            r#"{{"sub":"mallory","iat":{},"exp":{},"jti":"x"}}"#,
            Utc::now().timestamp(),
            Utc::now().timestamp() + 3600
        );
        let forged = replace_segment(&token, 1, &URL_SAFE_NO_PAD.encode(payload));

        assert!(issuer.verify(&forged).is_err());
    }

    #[test]
    fn token_from_other_key_is_rejected() {
        let other = TokenIssuer::new(b"another-key", Some(TimeDelta::hours(1)));
        let token = other.issue("alice").unwrap();

        let result = issuer().verify(&token);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "alice".into(),
            iat: now - 7200,
            exp: Some(now - 3600),
            jti: "expired".into(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = issuer().verify(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn token_without_expiry_is_rejected_when_ttl_is_enabled() {
        let eternal = TokenIssuer::new(SECRET, None);
        let token = eternal.issue("alice").unwrap();

        assert!(matches!(
            issuer().verify(&token),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn issuer_without_ttl_issues_non_expiring_tokens() {
        let eternal = TokenIssuer::new(SECRET, None);
        let token = eternal.issue("alice").unwrap();

        let claims = eternal.verify(&token).unwrap();
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            issuer().verify("not-a-token"),
            Err(AuthError::MalformedToken)
        ));
        assert!(matches!(issuer().verify(""), Err(AuthError::MalformedToken)));
    }

    #[test]
    fn consecutive_tokens_differ() {
        let issuer = issuer();
        assert_ne!(issuer.issue("alice").unwrap(), issuer.issue("alice").unwrap());
    }
}
