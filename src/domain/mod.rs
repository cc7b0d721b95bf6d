//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the raw feed shape (`RawRound`)
//! - validated draw records and the per-fetch aggregate (`DrawRecord`, `DrawData`)
//! - the window selector (`SelectedWindow`)

pub mod types;

pub use types::*;
