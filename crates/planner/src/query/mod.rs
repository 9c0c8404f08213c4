pub mod catalog;
pub mod dialect;
