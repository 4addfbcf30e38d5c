pub mod provider;
pub mod service;

pub use provider::{OverpassFileProvider, OverpassProvider};
pub use service::RoadSetProvider;
