pub mod http;
pub mod purge;
