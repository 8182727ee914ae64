//! API token generation and hashing.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// API token prefix, so leaked tokens are recognisable.
pub const API_TOKEN_PREFIX: &str = "sf_";

/// Number of random bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

/// Generate a fresh opaque API token.
#[must_use]
pub fn generate_api_token() -> String {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    let mut token = String::with_capacity(API_TOKEN_PREFIX.len() + API_TOKEN_SECRET_BYTES * 2);

    token.push_str(API_TOKEN_PREFIX);
    token.push_str(&hex(&secret));

    token
}

/// Hash a raw token for storage and lookup. Only the hash is persisted.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    hex(&Sha256::digest(token.as_bytes()))
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        out.extend(char::from_digit(u32::from(byte >> 4), 16));
        out.extend(char::from_digit(u32::from(byte & 0x0f), 16));
    }

    out
}
