pub mod error;
pub mod schemas;
