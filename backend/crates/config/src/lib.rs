pub mod env;
pub mod tracing_init;

pub use env::{AppConfig, CollectionNames, MongoConfig, WorkLocationOptions};
pub use tracing_init::init_tracing;
