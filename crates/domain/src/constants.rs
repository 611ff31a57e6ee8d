//! Domain constants
//!
//! Centralized location for all domain-level constants used throughout the
//! SDK.

// Token freshness
/// Tokens expiring within this many seconds are treated as stale and
/// refreshed before use. Shared by user and anonymous tokens.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

// Provider handoff link query keys
pub const OAUTH2_PARAMS_QUERY_KEY: &str = "oauth2_params";

// OAuth grant types
pub const GRANT_TYPE_AUTH_CODE: &str = "authorization_code";
pub const GRANT_TYPE_REFRESH_TOKEN: &str = "refresh_token";

// Scope required for group subscription operations
pub const GROUPS_SCOPE: &str = "groups";

// OAuth error codes recognized by the error classifiers
pub const OAUTH_ERROR_INVALID_TOKEN: &str = "invalid_token";
pub const OAUTH_ERROR_EXPIRED_TOKEN: &str = "expired_token";
pub const OAUTH_ERROR_INVALID_GRANT: &str = "invalid_grant";
pub const OAUTH_ERROR_INVALID_REFRESH_TOKEN: &str = "invalid_refresh_token";
