//! Library half of the `xmeml` binary: logging setup and the generation
//! pipeline.

pub mod logging;
pub mod pipeline;
