// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Credential registration, login, and bearer token checks for the gateway.
//!
//! ## Auth Flow
//!
//! 1. Client registers or logs in with `{username, password}`
//! 2. Gateway answers with an HS256 JWT whose `sub` is the username
//! 3. Client sends `Authorization: Bearer <token>` to the address routes
//! 4. [`middleware::require_auth`] verifies signature and expiry before the
//!    handler runs and attaches the [`AuthenticatedUser`]
//!
//! ## Security
//!
//! - Secrets are stored only as salted Argon2id hashes
//! - Tokens are stateless; there is no revocation list
//! - Clock skew tolerance is 60 seconds
//! - Authentication only: there are no roles or scopes

pub mod claims;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod service;
pub mod token;

pub use claims::{AuthenticatedUser, Claims};
pub use credentials::{CredentialStore, CredentialStoreKind};
pub use error::AuthError;
pub use extractor::Auth;
pub use service::AuthService;
pub use token::TokenIssuer;
