//! Server-side session store.
//!
//! A session is an opaque bearer token delivered as a cookie; the
//! server keeps only the SHA-256 hash of the token, mapped to the
//! account id. The account itself is re-fetched per operation — the
//! identifier is the sole state carried across requests.

use std::collections::HashMap;

/// Hash a session token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random session token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// In-memory session store: token hash → account id.
#[derive(Default)]
pub struct SessionStore {
    sessions: HashMap<[u8; 32], i64>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Create a session for an account; returns the token to hand to
    /// the client.
    pub fn issue(&mut self, account_id: i64) -> String {
        let token = generate_token();
        self.sessions.insert(hash_token(&token), account_id);
        token
    }

    /// Resolve a presented token to an account id, if the session exists.
    pub fn resolve(&self, token: &str) -> Option<i64> {
        self.sessions.get(&hash_token(token)).copied()
    }

    /// Drop the session for a presented token (logout). Safe to call
    /// with an unknown token.
    pub fn revoke(&mut self, token: &str) {
        self.sessions.remove(&hash_token(token));
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
