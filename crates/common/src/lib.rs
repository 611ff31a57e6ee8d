//! Cross-cutting utilities shared across GateKit crates.
//!
//! This crate holds the pieces the engine consumes but which are not
//! business logic themselves:
//! - [`pkce`]: RFC 7636 secret generation (verifier, challenge, state)
//! - [`storage`]: keyed secure-store abstraction with a platform keychain
//!   provider
//! - [`testing`]: in-memory doubles for the storage abstraction

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod pkce;
pub mod storage;
pub mod testing;

// Re-export commonly used types and functions
pub use pkce::{generate_code_challenge, generate_code_verifier, generate_state, PkceSecrets};
pub use storage::{KeychainStore, SecureStore, StoreError};
