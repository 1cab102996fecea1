mod schema;

pub use schema::{ClockConfig, Config, DatasetConfig, SearchConfig};
