#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::constants::{DEFAULT_GRADE_CONFIG, DEFAULT_RUBRIC};

/// What one Canvas assignment is worth and which Physics Classroom concept
/// builders feed into it.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentSpec {
    /// Point value of the assignment on Canvas, i.e. the expected number of
    /// non-bonus sub-parts.
    pub points: f64,
    /// Expected number of Wizard-level sub-parts over the assigned value.
    pub bonus:  f64,
    /// Exact names of the concept builders belonging to this assignment.
    pub tasks:  Vec<String>,
}

/// The assignment rubric: Canvas assignment name → [`AssignmentSpec`].
///
/// Deserialized from a TOML table of tables; iteration order is alphabetical
/// by assignment name, which keeps every run deterministic.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Rubric {
    /// Assignment name → spec.
    assignments: BTreeMap<String, AssignmentSpec>,
}

impl Rubric {
    /// Parses a rubric from TOML text.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let rubric: Rubric = toml::from_str(raw).context("Could not parse assignment rubric")?;
        ensure!(!rubric.assignments.is_empty(), "Assignment rubric defines no assignments");
        Ok(rubric)
    }

    /// Loads a rubric from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("While loading {}", path.display()))
    }

    /// The rubric shipped with the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_toml(DEFAULT_RUBRIC).context("While loading the bundled assignment rubric")
    }

    /// Iterates (assignment name, spec) pairs in alphabetical order.
    pub fn assignments(&self) -> impl Iterator<Item = (&String, &AssignmentSpec)> {
        self.assignments.iter()
    }

    /// The spec for `assignment`, if the rubric declares it.
    pub fn get(&self, assignment: &str) -> Option<&AssignmentSpec> {
        self.assignments.get(assignment)
    }

    /// Number of assignments declared.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// True when the rubric declares no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// One letter-grade cutoff.
#[derive(Debug, Clone, Deserialize)]
pub struct GradeMinimum {
    /// Lowest numeric grade that still earns the letter.
    pub min:    f64,
    /// The letter grade.
    pub letter: String,
}

/// Configuration for final-grade calculation.
#[derive(Debug, Clone, Deserialize)]
pub struct GradeConfig {
    /// Gradebook column prefixes averaged into the final grade; each unit
    /// must have both a "Final Score" and a "Current Score" column.
    pub units:          Vec<String>,
    /// Unit scores above this count as this when averaging.
    #[serde(default = "default_score_ceiling")]
    pub score_ceiling:  f64,
    /// Letter cutoffs, checked top to bottom; keep sorted by descending
    /// `min`.
    pub grade_minimums: Vec<GradeMinimum>,
}

/// Default clamp applied to unit scores before averaging.
fn default_score_ceiling() -> f64 {
    100.0
}

impl GradeConfig {
    /// Parses a final-grade config from TOML text.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: GradeConfig =
            toml::from_str(raw).context("Could not parse final-grade config")?;
        ensure!(!config.units.is_empty(), "Final-grade config lists no units");
        ensure!(
            !config.grade_minimums.is_empty(),
            "Final-grade config lists no grade_minimums"
        );
        Ok(config)
    }

    /// Loads a final-grade config from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("While loading {}", path.display()))
    }

    /// The final-grade config shipped with the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_toml(DEFAULT_GRADE_CONFIG)
            .context("While loading the bundled final-grade config")
    }
}
