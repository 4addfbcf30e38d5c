pub mod batch;
pub mod cache;
pub mod resolver;

pub use batch::{analyze_properties, BatchSummary, FacingReport, PropertyFacing};
pub use cache::{CachedFacing, CoordKey, FacingCache};
pub use resolver::{Facing, FacingResolver};
