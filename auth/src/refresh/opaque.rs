use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Digest;
use sha2::Sha256;

use super::errors::RefreshTokenError;

/// Number of random bytes behind every refresh token.
pub const TOKEN_BYTES: usize = 32;

/// Generate a cryptographically random opaque refresh token.
///
/// 32 bytes from the operating system RNG, URL-safe base64 encoded
/// (padded, 44 characters). The value is handed to the client once and only
/// its [`hash_token`] digest is ever persisted.
///
/// # Errors
/// * `GenerationFailed` - The OS random source is unavailable
pub fn generate_token() -> Result<String, RefreshTokenError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RefreshTokenError::GenerationFailed(e.to_string()))?;

    Ok(URL_SAFE.encode(bytes))
}

/// SHA-256 digest of a refresh token string, URL-safe base64 encoded.
///
/// This is the value stored as `refresh_tokens.token_hash`.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    URL_SAFE.encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_url_safe() {
        let token = generate_token().unwrap();

        assert_eq!(token.len(), 44);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '='));
        assert_eq!(URL_SAFE.decode(&token).unwrap().len(), TOKEN_BYTES);
    }

    #[test]
    fn test_tokens_are_unique() {
        let first = generate_token().unwrap();
        let second = generate_token().unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_token("some-refresh-token"), hash_token("some-refresh-token"));
        assert_ne!(hash_token("token-a"), hash_token("token-b"));
    }

    #[test]
    fn test_hash_known_value() {
        // SHA-256("abc")
        assert_eq!(
            hash_token("abc"),
            "ungWv48Bz-pBQUDeXa4iI7ADYaOWF3qctBD_YfIAFa0="
        );
    }

    #[test]
    fn test_hash_never_equals_token() {
        let token = generate_token().unwrap();

        assert_ne!(hash_token(&token), token);
    }
}
