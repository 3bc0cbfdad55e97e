//! Authentication primitives
//!
//! Provides the credential building blocks used by the auth service:
//! - Password hashing (Argon2id)
//! - Access token signing and verification (HS256 JWT)
//! - Opaque refresh tokens and their at-rest digests
//!
//! Nothing in this crate performs I/O; persistence of users and refresh token
//! digests belongs to the service.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("my_password", "garbage").unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::{Duration, Utc};
//! use uuid::Uuid;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", "PaperTradingApp");
//! let claims = Claims::for_user(
//!     Uuid::new_v4(),
//!     "alice@example.com",
//!     "PaperTradingApp",
//!     Utc::now(),
//!     Duration::minutes(15),
//! );
//! let token = handler.encode(&claims).unwrap();
//! assert_eq!(handler.decode(&token).unwrap(), claims);
//! ```
//!
//! ## Refresh Tokens
//! ```
//! use auth::refresh;
//!
//! let token = refresh::generate_token().unwrap();
//! let digest = refresh::hash_token(&token);
//! assert_ne!(token, digest);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedAccessToken;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::RefreshTokenError;
