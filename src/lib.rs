//! StressScore - deterministic stress scoring from health snapshots
//!
//! StressScore turns a physiological snapshot and a behavioral snapshot into
//! a stress assessment through a fixed, rule-based pipeline: per-metric
//! normalization → weighted aggregation → categorization → risk factors and
//! recommendations.
//!
//! ## Modules
//!
//! - **Scorer**: the pure scoring function and its weight tables
//! - **Pipeline**: JSON document processing with validation and reports

pub mod advice;
pub mod encoder;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod schema;
pub mod scorer;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use error::ComputeError;
pub use pipeline::{
    analyze_stress, stress_json_to_analysis, stress_json_to_analysis_unchecked,
    stress_json_to_report, StressProcessor,
};
pub use scorer::StressScorer;
pub use types::{BehavioralSnapshot, PhysiologicalSnapshot, StressAnalysis, StressCategory};

// Schema exports
pub use schema::{InputAdapter, StressInput, ValidationError, SCHEMA_VERSION};

/// Library version embedded in all reports
pub const STRESS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "stress-score";
