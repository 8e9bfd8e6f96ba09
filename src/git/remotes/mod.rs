pub mod credentials;
pub mod operations;
