//! Data acquisition.

pub mod ircc;

pub use ircc::*;
