//! CLI command implementations.

pub mod arith;
pub mod common;
pub mod defaults;
pub mod divide;
pub mod info;
pub mod mean;
