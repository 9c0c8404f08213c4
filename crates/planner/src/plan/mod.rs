pub mod builder;
pub mod catalog;
pub mod clause;
pub mod consolidate;

pub use builder::AlterPlanBuilder;
pub use catalog::ColumnCatalog;
