pub mod csv;
pub mod onthehouse;
pub mod source;

pub use self::csv::load_properties_csv;
pub use onthehouse::OnTheHouseSource;
pub use source::{Property, PropertyQuery, PropertySource};
