//! PKCE (Proof Key for Code Exchange) secret generation
//!
//! Implements RFC 7636 for authorization flows that cannot protect a client
//! secret. One set of secrets is generated per authorization attempt; the
//! `state` component must round-trip unchanged through every response of
//! that attempt.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a cryptographically secure code verifier
///
/// Returns a URL-safe base64-encoded random string of 32 bytes (43
/// characters). Per RFC 7636, verifiers must be 43-128 characters long.
#[must_use]
pub fn generate_code_verifier() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Generate the code challenge for a verifier
///
/// Per RFC 7636, the challenge is BASE64URL(SHA256(ASCII(code_verifier))).
#[must_use]
pub fn generate_code_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    let hash = hasher.finalize();
    URL_SAFE_NO_PAD.encode(hash)
}

/// Generate a random state token
///
/// Returns a URL-safe base64-encoded random string of 32 bytes (43
/// characters). Unguessable by construction; equality is the only
/// validation.
#[must_use]
pub fn generate_state() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// PKCE secrets for one authorization attempt
///
/// Contains the code verifier (sent during token exchange), the code
/// challenge (sent in the handoff link), and the per-attempt `state`.
#[derive(Debug, Clone)]
pub struct PkceSecrets {
    /// Random string (43-128 chars, base64url encoded).
    /// Kept secret until token exchange.
    pub code_verifier: String,

    /// SHA256 hash of `code_verifier` (base64url encoded).
    /// Sent in the handoff link for server validation.
    pub code_challenge: String,

    /// Random per-attempt token.
    /// Must match between the handoff link and the callback.
    pub state: String,
}

impl PkceSecrets {
    /// Generate a new secret set with cryptographically secure random values.
    #[must_use]
    pub fn generate() -> Self {
        let code_verifier = generate_code_verifier();
        let code_challenge = generate_code_challenge(&code_verifier);
        let state = generate_state();

        Self { code_verifier, code_challenge, state }
    }

    /// Get the challenge method (always "S256" for SHA256).
    #[must_use]
    pub fn challenge_method(&self) -> &str {
        "S256"
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for pkce.
    use super::*;

    /// Validates `PkceSecrets::generate` behavior for the secret generation
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures `secrets.code_verifier.len() >= 43` evaluates to true.
    /// - Ensures `secrets.code_verifier.len() <= 128` evaluates to true.
    /// - Ensures `!secrets.code_challenge.is_empty()` evaluates to true.
    /// - Ensures `!secrets.state.is_empty()` evaluates to true.
    #[test]
    fn test_generate_pkce_secrets() {
        let secrets = PkceSecrets::generate();

        // Verify code_verifier length (RFC 7636: 43-128 chars)
        assert!(
            secrets.code_verifier.len() >= 43,
            "code_verifier too short: {} chars",
            secrets.code_verifier.len()
        );
        assert!(
            secrets.code_verifier.len() <= 128,
            "code_verifier too long: {} chars",
            secrets.code_verifier.len()
        );

        assert!(!secrets.code_challenge.is_empty());
        assert!(!secrets.state.is_empty());
    }

    /// Validates `PkceSecrets::generate` behavior for the uniqueness
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `first.code_verifier` differs from `second.code_verifier`.
    /// - Confirms `first.code_challenge` differs from
    ///   `second.code_challenge`.
    /// - Confirms `first.state` differs from `second.state`.
    #[test]
    fn test_unique_secrets() {
        // Each generation should produce unique values
        let first = PkceSecrets::generate();
        let second = PkceSecrets::generate();

        assert_ne!(first.code_verifier, second.code_verifier);
        assert_ne!(first.code_challenge, second.code_challenge);
        assert_ne!(first.state, second.state);
    }

    /// Validates `PkceSecrets::generate` behavior for the challenge method
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `secrets.challenge_method()` equals `"S256"`.
    #[test]
    fn test_challenge_method() {
        let secrets = PkceSecrets::generate();
        assert_eq!(secrets.challenge_method(), "S256");
    }

    /// Validates `PkceSecrets::generate` behavior for the base64url encoding
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures no component contains padding (`=`).
    /// - Ensures no component contains `+` or `/`.
    #[test]
    fn test_base64url_encoding() {
        let secrets = PkceSecrets::generate();

        for value in [&secrets.code_verifier, &secrets.code_challenge, &secrets.state] {
            assert!(!value.contains('='));
            assert!(!value.contains('+'));
            assert!(!value.contains('/'));
        }
    }

    /// Validates `generate_code_challenge` behavior for the deterministic
    /// challenge scenario.
    ///
    /// Assertions:
    /// - Confirms the challenge recomputed from the verifier equals the
    ///   generated one.
    #[test]
    fn test_code_challenge_deterministic() {
        // Same verifier should produce same challenge
        let secrets = PkceSecrets::generate();
        let recomputed = generate_code_challenge(&secrets.code_verifier);
        assert_eq!(secrets.code_challenge, recomputed);
    }
}
