pub mod adapter;
pub mod catalog;
pub mod params;
pub mod row;
