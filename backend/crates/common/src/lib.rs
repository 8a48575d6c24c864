pub mod error;
pub mod lenient;
pub mod models;
pub mod types;
