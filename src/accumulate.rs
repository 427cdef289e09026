#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Deserializer, de};
use tracing::warn;

use crate::{
    config::Rubric,
    constants::BONUS_SECTION_LABELS,
    error::GradingError,
    util::{list_comparison, sanitize},
};

/// One row of the "Detailed Progress" export: a single sub-part (difficulty
/// level) of a concept builder, for a single student.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressRecord {
    /// Concept-builder name as Physics Classroom exports it. May contain
    /// zero-width spaces; sanitized before lookup.
    #[serde(rename = "Task")]
    pub task:      String,
    /// Student name, "Last, First" form.
    #[serde(rename = "Student")]
    pub student:   String,
    /// Sub-difficulty label; "Wizard Level" / "Wizard" denote bonus content.
    #[serde(rename = "Section")]
    pub section:   String,
    /// Whether the student completed this sub-part.
    #[serde(rename = "Completed", deserialize_with = "bool_from_cell")]
    pub completed: bool,
}

/// Accepts `True`/`False` in any casing, which is how the export spells its
/// booleans when it arrives as csv.
fn bool_from_cell<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(de::Error::custom(format!("expected a boolean, got '{other}'"))),
    }
}

/// Earned points per student, keyed by student name.
pub type PointsByStudent = BTreeMap<String, u32>;

/// Earned points per assignment per student.
pub type PointsByAssignment = BTreeMap<String, PointsByStudent>;

/// Whether accumulation checks each student's observed task set against the
/// rubric's declared one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCoverage {
    /// Any difference between declared and observed task sets is fatal.
    Enforce,
    /// Skip the set comparison; the point-count checks still run.
    Ignore,
}

/// Running tallies for one (assignment, student) pair.
#[derive(Debug, Default)]
struct Tally {
    /// Completed sub-parts, regular and bonus alike.
    earned:     u32,
    /// Non-bonus sub-parts seen (completed or not).
    regular:    u32,
    /// Bonus sub-parts seen (completed or not).
    bonus:      u32,
    /// Distinct task names seen.
    tasks_seen: BTreeSet<String>,
}

/// Reverse lookup from task name to the assignment claiming it, built once
/// per call instead of rescanning every rubric entry per row.
struct TaskIndex<'r> {
    /// task name → assignment name.
    by_task: HashMap<&'r str, &'r str>,
}

impl<'r> TaskIndex<'r> {
    /// Indexes every task the rubric claims. A task claimed twice would make
    /// row attribution ambiguous, so that is fatal.
    fn build(rubric: &'r Rubric) -> Result<Self, GradingError> {
        let mut by_task = HashMap::new();
        for (assignment, spec) in rubric.assignments() {
            for task in &spec.tasks {
                if let Some(previous) = by_task.insert(task.as_str(), assignment.as_str()) {
                    return Err(GradingError::DuplicateTask {
                        task:   task.clone(),
                        first:  previous.to_string(),
                        second: assignment.clone(),
                    });
                }
            }
        }
        Ok(Self { by_task })
    }

    /// The assignment `task` belongs to, if any rubric entry claims it.
    fn assignment_for(&self, task: &str) -> Option<&'r str> {
        self.by_task.get(task).copied()
    }
}

/// Accumulates per-task progress rows into per-assignment point totals and
/// validates them against the rubric. Task-set coverage is enforced; see
/// [`accumulate_with_policy`] to relax that.
pub fn accumulate(
    rows: &[ProgressRecord],
    rubric: &Rubric,
) -> Result<PointsByAssignment, GradingError> {
    accumulate_with_policy(rows, rubric, TaskCoverage::Enforce)
}

/// Accumulates per-task progress rows into per-assignment point totals.
///
/// Rows are consumed in input order, though order never affects the result:
/// accumulation is commutative per (assignment, student) key. A row whose
/// task no rubric entry claims is skipped with a warning rather than failing
/// the run, which tolerates platform content the instructor has not yet
/// classified. After all rows are consumed, each (assignment, student) pair
/// is validated: the observed task set must equal the rubric's (under
/// [`TaskCoverage::Enforce`]), the regular and bonus sub-part counts must
/// equal the declared `points` and `bonus`, and earned points may never
/// exceed `points + bonus`. Any mismatch means a misconfigured rubric or a
/// changed task set on the platform, so the whole operation fails before any
/// grade is produced.
pub fn accumulate_with_policy(
    rows: &[ProgressRecord],
    rubric: &Rubric,
    coverage: TaskCoverage,
) -> Result<PointsByAssignment, GradingError> {
    let index = TaskIndex::build(rubric)?;

    let mut tallies: BTreeMap<&str, BTreeMap<String, Tally>> = BTreeMap::new();
    for row in rows {
        let task = sanitize(&row.task);
        let student = sanitize(&row.student);

        let Some(assignment) = index.assignment_for(&task) else {
            warn!("Found unexpected task: {task}");
            continue;
        };

        let tally = tallies
            .entry(assignment)
            .or_default()
            .entry(student)
            .or_default();

        if row.completed {
            tally.earned += 1;
        }

        let section = sanitize(&row.section).to_lowercase();
        if BONUS_SECTION_LABELS.contains(&section.as_str()) {
            tally.bonus += 1;
        } else {
            tally.regular += 1;
        }

        tally.tasks_seen.insert(task);
    }

    let mut earned = PointsByAssignment::new();
    for (assignment, spec) in rubric.assignments() {
        let mut per_student = PointsByStudent::new();

        if let Some(students) = tallies.get(assignment.as_str()) {
            for (student, tally) in students {
                if coverage == TaskCoverage::Enforce {
                    let mut expected: Vec<String> = spec.tasks.clone();
                    expected.sort();
                    let found: Vec<String> = tally.tasks_seen.iter().cloned().collect();
                    if expected != found {
                        return Err(GradingError::TaskSetMismatch {
                            assignment: assignment.clone(),
                            student:    student.clone(),
                            comparison: list_comparison(&expected, &found, "Expected", "Found"),
                        });
                    }
                }

                if f64::from(tally.regular) != spec.points {
                    return Err(GradingError::RegularCountMismatch {
                        assignment: assignment.clone(),
                        student:    student.clone(),
                        expected:   spec.points,
                        found:      tally.regular,
                    });
                }

                if f64::from(tally.bonus) != spec.bonus {
                    return Err(GradingError::BonusCountMismatch {
                        assignment: assignment.clone(),
                        student:    student.clone(),
                        expected:   spec.bonus,
                        found:      tally.bonus,
                    });
                }

                let maximum = spec.points + spec.bonus;
                if f64::from(tally.earned) > maximum {
                    return Err(GradingError::OverMaximum {
                        assignment: assignment.clone(),
                        student:    student.clone(),
                        earned:     tally.earned,
                        maximum,
                    });
                }

                per_student.insert(student.clone(), tally.earned);
            }
        }

        earned.insert(assignment.clone(), per_student);
    }

    Ok(earned)
}
