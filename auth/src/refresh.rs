use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

/// Random bytes behind every refresh token (256 bits).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate an opaque refresh token value.
///
/// 32 bytes from the operating system CSPRNG, lowercase hex encoded
/// (64 characters). The value carries no structure; its meaning lives
/// entirely in the server-side row keyed by it.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
