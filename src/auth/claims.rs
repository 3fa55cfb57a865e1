// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by every gateway token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the identity the token was issued for
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp, absent when expiry is disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Unique token ID
    pub jti: String,
}

impl Claims {
    pub fn new(identity: impl Into<String>, issued_at: DateTime<Utc>, ttl: Option<TimeDelta>) -> Self {
        let exp = ttl
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .map(|expires| expires.timestamp());

        Self {
            sub: identity.into(),
            iat: issued_at.timestamp(),
            exp,
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn identity(&self) -> &str {
        &self.sub
    }
}

/// Authenticated caller, attached to request extensions by the auth gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Identity from the token subject
    pub identity: String,

    /// Token issue time (Unix timestamp)
    pub issued_at: i64,

    /// Token expiration (Unix timestamp), if the token expires
    pub expires_at: Option<i64>,

    /// Token ID, useful for correlating log lines
    pub token_id: String,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            identity: claims.sub,
            issued_at: claims.iat,
            expires_at: claims.exp,
            token_id: claims.jti,
        }
    }
}
