//! Unguessable token generation.
//!
//! Tokens double as storage keys and as write capabilities; the only hard
//! requirement is global uniqueness with overwhelming probability.

use uuid::Uuid;

/// Generate one opaque token: 32 lowercase hex characters.
pub fn generate() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Generate the read/write token pair for a new document. The two tokens
/// are always distinct.
pub fn fresh_pair() -> (String, String) {
    let read = generate();
    loop {
        let write = generate();
        if write != read {
            return (read, write);
        }
    }
}
