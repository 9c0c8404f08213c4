pub mod error;
pub mod execution;
pub mod report;

#[cfg(test)]
mod tests;
