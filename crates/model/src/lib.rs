pub mod alter;
pub mod catalog;
pub mod core;
pub mod errors;
