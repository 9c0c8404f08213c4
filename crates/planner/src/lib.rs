pub mod error;
pub mod plan;
pub mod query;
pub mod symbols;
