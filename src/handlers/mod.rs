pub mod alert;
pub mod market;
pub mod project;
pub mod recommendation;
pub mod stats;
