pub mod clause;
pub mod statement;
