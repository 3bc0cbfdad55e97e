pub mod errors;
pub mod opaque;

pub use errors::RefreshTokenError;
pub use opaque::generate_token;
pub use opaque::hash_token;
