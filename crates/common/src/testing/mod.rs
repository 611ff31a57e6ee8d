//! Testing utilities
//!
//! In-memory doubles for the storage abstraction, usable from any crate's
//! tests.

pub mod mocks;

pub use mocks::{FailingSecureStore, MemorySecureStore};
