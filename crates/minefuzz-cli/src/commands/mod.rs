//! CLI command implementations.

pub mod campaigns;
pub mod run;
