pub mod token;
pub mod user;

pub use token::PostgresTokenStore;
pub use user::PostgresUserStore;
