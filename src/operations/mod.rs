pub mod creation;
pub mod partition;
