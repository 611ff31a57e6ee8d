//! Live session state
//!
//! [`UserSession`] is the observable wrapper around one
//! [`UserSessionData`]; [`SessionRegistry`] holds the live sessions keyed
//! by user id.

pub mod registry;
pub mod session;

pub use registry::SessionRegistry;
pub use session::{Authorization, UserSession};
