//! `noteforge-auth` — pure authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it issues and
//! validates signed session tokens and hashes/verifies credentials. Resolving
//! a token into a live principal (the user row must still exist) is the API
//! layer's job.

pub mod claims;
pub mod password;
pub mod token;

pub use claims::{Claims, TOKEN_TTL_HOURS};
pub use token::{TokenCodec, TokenError};
