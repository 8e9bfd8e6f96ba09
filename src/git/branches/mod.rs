pub mod naming;
pub mod operations;
