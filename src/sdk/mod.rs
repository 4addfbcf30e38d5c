pub mod config;
pub mod error;
pub mod facing;
pub mod orientation;
pub mod properties;
pub mod roads;
pub mod util;
