//! Re-exports commonly used items from this crate.
//!
//! This module is intended to be imported with a wildcard, providing
//! convenient access to the most frequently used traits and types.
//!
//! # Example
//!
//! ```
//! use onepass::prelude::*;
//! ```

#[cfg(feature = "alloc")]
pub use crate::{Pipe, PipelineBuilder};
pub use crate::{Outcome, Reduce, Source, Step};
