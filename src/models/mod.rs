pub mod alert;
pub mod analysis;
pub mod market;
pub mod project;
pub mod stats;
