//! CLI library components for tabprep.

pub mod logging;
pub mod pipeline;
pub mod summary;
