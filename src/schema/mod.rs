//! stress.input.v1 schema
//!
//! This module defines the JSON document accepted by the pipeline, the
//! caller-level validation of snapshots, and NDJSON/array parsing.

mod adapter;
mod input;

pub use adapter::*;
pub use input::*;
