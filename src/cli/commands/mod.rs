//! Command implementations

pub mod analyze;
pub mod brief;
pub mod dashboard;
pub mod status;
pub mod version;
