// Service exports
pub mod dataset;

pub use dataset::{load_store, read_listings, DatasetError};
