//! Input/output helpers.
//!
//! - feed validation + indexing (`ingest`)
//! - projection exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
