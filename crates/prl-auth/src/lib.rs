//! Stateless authentication and identity management.
//!
//! JWT session tokens with Argon2 password hashing. Tokens carry the whole
//! identity: the server keeps no session records, and the signed cookie is
//! presented on both HTTP requests and WebSocket handshakes.
//!
//! ## Identity
//!
//! - [`Member`] — Registered user with persisted credentials
//! - [`Claims`] — JWT payload asserting a member identity
//!
//! ## Security
//!
//! - [`Crypto`] — JWT signing and verification
//! - [`Hasher`] / [`password`] — Argon2 hashing and verification
//!
//! ## HTTP Surface
//!
//! The [`register`], [`login`], and [`profile`] handlers cover the account
//! routes; [`Auth`] is the cookie-validating request extractor.
mod claims;
mod crypto;
mod dto;
mod error;
mod handlers;
mod member;
mod middleware;
pub mod password;
mod repository;

pub use claims::*;
pub use crypto::*;
pub use dto::*;
pub use error::*;
pub use handlers::*;
pub use member::*;
pub use middleware::*;
pub use password::Hasher;
pub use repository::*;
