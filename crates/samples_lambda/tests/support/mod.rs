pub mod fixtures;
pub mod stores;
