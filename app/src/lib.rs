//! cropgrid: crop uniform borders from a batch of scans and tile them into a grid.
//!
//! The heavy lifting lives in the `image-processor` crate; this crate wires
//! up configuration, file discovery, decoding and encoding around it.

pub mod config;
pub mod discovery;
pub mod error;
pub mod io;
pub mod paths;
pub mod pipeline;
pub mod report;

pub use config::{Cli, Config};
pub use error::AppError;
pub use pipeline::{RunSummary, run};
