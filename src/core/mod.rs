pub mod analog;
pub mod config;
pub mod distance;
pub mod error;
pub mod series;
