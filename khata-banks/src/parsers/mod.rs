//! Per-bank extraction pipelines.
//!
//! Shared design: every field tries a primary labeled pattern, then one
//! or more secondary phrasings, and on total failure stays empty. An
//! extractor never fails over a missing field; the only error source is
//! pattern compilation, which the orchestrator absorbs.

pub mod axis;
pub mod hdfc;
pub mod icici;
pub mod kotak;
pub mod line;
pub mod sbi;

pub use axis::parse_axis;
pub use hdfc::parse_hdfc;
pub use icici::parse_icici;
pub use kotak::parse_kotak;
pub use sbi::parse_sbi;
