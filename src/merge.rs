#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::{
    accumulate::{PointsByAssignment, PointsByStudent},
    config::Rubric,
    constants::{POINTS_POSSIBLE_SENTINEL, STUDENT_COLUMN, TEST_STUDENT_SENTINEL},
    error::GradingError,
    table::Table,
    util::list_comparison,
};

/// Locates the "Points Possible" sentinel row and extracts the student
/// roster that follows it, in gradebook order.
///
/// Returns the sentinel's row index and the roster. A trailing "Student,
/// Test" placeholder is dropped from the roster; its row stays in the table
/// and simply never receives a write.
pub fn roster(gradebook: &Table) -> Result<(usize, Vec<String>), GradingError> {
    let student_col =
        gradebook
            .column_index(STUDENT_COLUMN)
            .ok_or_else(|| GradingError::MissingColumn {
                name: STUDENT_COLUMN.to_string(),
            })?;

    let sentinel_row = gradebook
        .column_values(student_col)
        .position(|cell| cell == POINTS_POSSIBLE_SENTINEL)
        .ok_or(GradingError::MissingSentinel)?;

    let mut names: Vec<String> = (sentinel_row + 1..gradebook.row_count())
        .map(|row| gradebook.cell(row, student_col).to_string())
        .collect();

    if names.last().is_some_and(|name| name == TEST_STUDENT_SENTINEL) {
        names.pop();
    }

    Ok((sentinel_row, names))
}

/// Merges accumulated concept-builder points into the Canvas gradebook.
///
/// For every rubric assignment, in order: the accumulated students (sorted)
/// must match the gradebook roster element for element; exactly one
/// gradebook column must start with the assignment name; and the point value
/// in the gradebook's Points Possible row must equal the rubric's. Every
/// assignment is validated before the first cell is written, so a validation
/// failure returns the error with the table untouched. Writes then fill
/// exactly the roster's row range in roster order, leaving all other rows
/// (including a dropped test-student row) alone.
pub fn merge(
    earned: &PointsByAssignment,
    mut gradebook: Table,
    rubric: &Rubric,
) -> Result<Table, GradingError> {
    let (sentinel_row, canvas_students) = roster(&gradebook)?;

    let none_accumulated = PointsByStudent::new();
    let mut writes: Vec<(usize, Vec<u32>)> = Vec::with_capacity(rubric.len());

    for (assignment, spec) in rubric.assignments() {
        let per_student = earned.get(assignment).unwrap_or(&none_accumulated);

        // BTreeMap keys are already sorted, matching the alphabetical order
        // of the Canvas export.
        let pc_students: Vec<String> = per_student.keys().cloned().collect();
        if pc_students != canvas_students {
            return Err(GradingError::RosterMismatch {
                assignment: assignment.clone(),
                comparison: list_comparison(
                    &pc_students,
                    &canvas_students,
                    "Physics Classroom",
                    "Canvas",
                ),
            });
        }

        let matches = gradebook.columns_with_prefix(assignment);
        let col = match matches.as_slice() {
            [] => {
                return Err(GradingError::MissingColumn {
                    name: assignment.clone(),
                });
            }
            [only] => *only,
            _ => {
                return Err(GradingError::AmbiguousColumn {
                    assignment: assignment.clone(),
                    matches:    matches
                        .iter()
                        .map(|&c| gradebook.header(c).to_string())
                        .collect(),
                });
            }
        };

        let declared_cell = gradebook.cell(sentinel_row, col);
        let canvas_points: f64 =
            declared_cell
                .trim()
                .parse()
                .map_err(|_| GradingError::BadNumber {
                    column: gradebook.header(col).to_string(),
                    row:    POINTS_POSSIBLE_SENTINEL.trim().to_string(),
                    value:  declared_cell.to_string(),
                })?;
        if canvas_points != spec.points {
            return Err(GradingError::PointValueDrift {
                assignment: assignment.clone(),
                canvas:     canvas_points,
                expected:   spec.points,
            });
        }

        let values: Vec<u32> = canvas_students
            .iter()
            .map(|student| per_student[student])
            .collect();
        writes.push((col, values));
    }

    for (col, values) in writes {
        for (offset, value) in values.into_iter().enumerate() {
            gradebook.set_cell(sentinel_row + 1 + offset, col, value.to_string());
        }
    }

    Ok(gradebook)
}
