use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims embedded in every access token.
///
/// Carries the user identity (`uid`, `email`) next to the registered
/// RFC 7519 claims. `sub` always equals `uid` rendered as a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User identifier
    pub uid: Uuid,

    /// User email as stored
    pub email: String,

    /// Subject (user identifier as string)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Token identifier, unique per issued token
    pub jti: Uuid,
}

impl Claims {
    /// Create claims for a user, valid from `now` for `lifetime`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - User email (stored in `email`)
    /// * `issuer` - Service identifier (stored in `iss`)
    /// * `now` - Issue instant, used for both `iat` and `nbf`
    /// * `lifetime` - Time until the token expires
    pub fn for_user(
        user_id: Uuid,
        email: impl Into<String>,
        issuer: impl Into<String>,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let issued_at = now.timestamp();

        Self {
            uid: user_id,
            email: email.into(),
            sub: user_id.to_string(),
            iss: issuer.into(),
            iat: issued_at,
            nbf: issued_at,
            exp: (now + lifetime).timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// The expiry instant itself is already expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Check if the token is used before its not-before instant.
    pub fn is_not_yet_valid(&self, current_timestamp: i64) -> bool {
        current_timestamp < self.nbf
    }

    /// Expiration as a UTC datetime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let claims = Claims::for_user(
            user_id,
            "alice@example.com",
            "PaperTradingApp",
            now,
            Duration::minutes(15),
        );

        assert_eq!(claims.uid, user_id);
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.iss, "PaperTradingApp");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.nbf, claims.iat);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_for_user_same_second_differs_by_jti() {
        let user_id = Uuid::new_v4();
        let now = DateTime::from_timestamp(1_000, 0).unwrap();

        let first = Claims::for_user(user_id, "a@b.c", "iss", now, Duration::minutes(15));
        let second = Claims::for_user(user_id, "a@b.c", "iss", now, Duration::minutes(15));

        assert_eq!(first.iat, second.iat);
        assert_ne!(first.jti, second.jti);
        assert_ne!(first, second);
    }

    #[test]
    fn test_is_expired() {
        let now = DateTime::from_timestamp(1_000, 0).unwrap();
        let claims = Claims::for_user(Uuid::new_v4(), "a@b.c", "iss", now, Duration::seconds(100));

        assert!(!claims.is_expired(1_099));
        assert!(claims.is_expired(1_100)); // Exactly at expiration
        assert!(claims.is_expired(1_101));
    }

    #[test]
    fn test_is_not_yet_valid() {
        let now = DateTime::from_timestamp(1_000, 0).unwrap();
        let claims = Claims::for_user(Uuid::new_v4(), "a@b.c", "iss", now, Duration::seconds(100));

        assert!(claims.is_not_yet_valid(999));
        assert!(!claims.is_not_yet_valid(1_000));
    }
}
