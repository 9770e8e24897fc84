//! Loading and validation of game configuration from disk.

pub mod load;

pub use load::*;
