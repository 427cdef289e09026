//! # pcgrade
//!
//! Reconciles the "Detailed Progress" export from Physics Classroom with an
//! exported Canvas gradebook: totals concept-builder points per assignment,
//! validates the totals against a declared rubric, and fills the matching
//! gradebook columns. A second pass computes overall numeric and letter
//! grades from an already-merged gradebook.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Totals per-task progress rows into per-assignment points and validates
/// them against the rubric
pub mod accumulate;
/// Rubric and final-grade configuration types and loaders
pub mod config;
/// Sentinel strings, section labels, and the bundled default configs
pub mod constants;
/// Fatal reconciliation failures
pub mod error;
/// Overall numeric and letter grades from a merged gradebook
pub mod final_grades;
/// File adapters for the progress export, the gradebook, and TOML configs
pub mod io;
/// Writes accumulated points into the gradebook's assignment columns
pub mod merge;
/// The in-memory tabular model both exports are loaded into
pub mod table;
/// String sanitizing and aligned list comparisons
pub mod util;
