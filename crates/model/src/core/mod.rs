pub mod intent;
pub mod selection;
