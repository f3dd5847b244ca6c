//! CLI command implementations

pub mod pixel;
