pub mod catalog;
pub mod generation;

pub use catalog::*;
pub use generation::*;
