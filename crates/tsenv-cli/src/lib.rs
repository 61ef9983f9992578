//! Library side of the `tsenv` binary: argument parsing, reporting and
//! tracing setup.

pub mod args;
pub mod report;
pub mod tracing_config;
