pub mod file;
pub mod overpass;
pub mod types;

pub use file::OverpassFileProvider;
pub use overpass::OverpassProvider;
