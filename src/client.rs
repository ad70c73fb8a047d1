// File: src/client.rs
pub mod core;
pub mod error;

pub use self::core::{PlantSearch, SearchClient};
pub use self::error::SearchError;
