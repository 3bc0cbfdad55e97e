use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

const BEARER_PREFIX: &str = "Bearer ";

/// Algorithms accepted on decode. Tokens are always signed with HS256; any
/// header naming a non-HMAC algorithm is rejected before the signature check.
const HMAC_FAMILY: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT token handler for encoding and decoding access tokens.
///
/// Signs with HS256 (HMAC with SHA-256) and only accepts tokens issued by
/// the configured issuer.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `issuer` - Expected `iss` claim on every decoded token
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: issuer.into(),
        }
    }

    /// Issuer stamped into and expected from tokens.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Encode claims into a signed JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT against the current time.
    ///
    /// See [`JwtHandler::decode_at`].
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode_at(token, Utc::now().timestamp())
    }

    /// Decode and validate a JWT against `now` (Unix timestamp).
    ///
    /// An optional `Bearer ` prefix is stripped first. Signature, algorithm
    /// family, issuer and the presence of the registered claims are checked by
    /// `jsonwebtoken`; the temporal claims are checked here so that the expiry
    /// instant itself counts as expired.
    ///
    /// # Errors
    /// * `TokenExpired` - `now` is at or past `exp`
    /// * `TokenNotYetValid` - `now` is before `nbf`
    /// * `InvalidToken` - Malformed, bad signature, wrong algorithm or issuer
    pub fn decode_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim();

        let mut validation = Validation::new(self.algorithm);
        validation.algorithms = HMAC_FAMILY.to_vec();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "nbf", "iat", "iss", "sub"]);
        validation.set_issuer(&[self.issuer.as_str()]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?
            .claims;

        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }
        if claims.is_not_yet_valid(now) {
            return Err(JwtError::TokenNotYetValid);
        }
        if claims.sub != claims.uid.to_string() {
            return Err(JwtError::InvalidToken(
                "subject does not match user id".to_string(),
            ));
        }

        Ok(claims)
    }
}
