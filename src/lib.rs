pub mod error;
pub mod frame;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod scene;
pub mod wall;

pub use error::{Result, SashframeError};
