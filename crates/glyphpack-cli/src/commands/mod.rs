//! CLI command implementations

pub mod generate;
pub mod generate_all;
pub mod json_output;
pub mod preview;
pub mod validate;

mod reporting;
