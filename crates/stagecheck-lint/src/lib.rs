//! Validation engine for stagecheck.
//!
//! Runs a fixed, ordered battery of heuristic checks over an imported scene
//! snapshot and produces a categorized finding report plus polygon and mesh
//! summary counters.
//!
//! # Example
//!
//! ```no_run
//! use stagecheck_lint::Validator;
//! use stagecheck_scene::ResourceBundle;
//!
//! let bytes = std::fs::read("model.glb").unwrap();
//! let report = Validator::new().validate(&bytes, &ResourceBundle::new());
//!
//! for finding in report.findings() {
//!     println!("{:?}: {}", finding.severity, finding.message);
//! }
//! ```

pub mod report;
pub mod rules;
pub mod validator;

pub use report::{Finding, Severity, ValidationReport};
pub use rules::{all_rules, RuleMetadata, ValidationRule};
pub use validator::Validator;
