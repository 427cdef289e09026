#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use tabled::Tabled;
use tracing::warn;

use crate::{
    config::GradeConfig,
    constants::{
        CURRENT_SCORE_SUFFIX, FINAL_SCORE_SUFFIX, POINTS_POSSIBLE_SENTINEL, STUDENT_COLUMN,
        TEST_STUDENT_SENTINEL,
    },
    error::GradingError,
    table::Table,
};

/// One row of the printed final-grade report.
#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
pub struct GradeRow {
    /// Student name, "Last, First" form.
    #[tabled(rename = "Student")]
    pub student: String,
    /// Numeric grade, already formatted to two decimals.
    #[tabled(rename = "Grade")]
    pub grade:   String,
    /// Letter grade.
    #[tabled(rename = "Letter")]
    pub letter:  String,
}

/// Reads a score cell. Empty and `nan` cells become NaN, which is how Canvas
/// exports a not-yet-entered Current Score.
fn parse_score(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    trimmed.parse().ok()
}

/// Calculates each student's overall numeric grade from an already-merged
/// gradebook.
///
/// For every student row after the Points Possible sentinel (skipping a
/// "Student, Test" placeholder), reads each configured unit's Final Score
/// and Current Score. A zero final with an empty current score is an
/// ungraded unit and only warns. Any other disagreement between the two
/// fields signals an unresolved regrade or an export race and fails the run.
/// Unit scores are clamped to `config.score_ceiling` before the grade is
/// taken as their arithmetic mean.
///
/// Returns the students and their grades in matching order.
pub fn calc_grades(
    gradebook: &Table,
    config: &GradeConfig,
) -> Result<(Vec<String>, Vec<f64>), GradingError> {
    if config.units.is_empty() {
        return Err(GradingError::NoUnits);
    }

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

    let mut students = Vec::new();
    let mut grades = Vec::new();

    for row in sentinel_row + 1..gradebook.row_count() {
        let student = gradebook.cell(row, student_col);
        if student == TEST_STUDENT_SENTINEL {
            continue;
        }

        let mut unit_scores = Vec::with_capacity(config.units.len());
        for unit in &config.units {
            let final_name = format!("{unit}{FINAL_SCORE_SUFFIX}");
            let current_name = format!("{unit}{CURRENT_SCORE_SUFFIX}");

            let final_score = read_score(gradebook, row, &final_name, student)?;
            let current_score = read_score(gradebook, row, &current_name, student)?;

            // An empty Current Score alongside a zero final just means the
            // unit has not been graded yet.
            if final_score == 0.0 && current_score.is_nan() {
                warn!("'Current Score' empty for unit {unit}, student {student}");
            } else if final_score != current_score {
                return Err(GradingError::ScoreDisagreement {
                    unit:        unit.clone(),
                    student:     student.to_string(),
                    final_score,
                    current:     current_score,
                });
            }

            unit_scores.push(final_score.min(config.score_ceiling));
        }

        students.push(student.to_string());
        grades.push(unit_scores.iter().sum::<f64>() / unit_scores.len() as f64);
    }

    Ok((students, grades))
}

/// Looks up the named column and parses its cell in `row`.
fn read_score(
    gradebook: &Table,
    row: usize,
    column: &str,
    student: &str,
) -> Result<f64, GradingError> {
    let col = gradebook
        .column_index(column)
        .ok_or_else(|| GradingError::MissingColumn {
            name: column.to_string(),
        })?;
    let cell = gradebook.cell(row, col);
    parse_score(cell).ok_or_else(|| GradingError::BadNumber {
        column: column.to_string(),
        row:    student.to_string(),
        value:  cell.to_string(),
    })
}

/// Letter grade for `grade`: the first configured cutoff it meets or
/// exceeds. Cutoffs are checked in config order, which is assumed sorted by
/// descending minimum.
pub fn letter_for(grade: f64, config: &GradeConfig) -> Result<&str, GradingError> {
    config
        .grade_minimums
        .iter()
        .find(|cutoff| grade >= cutoff.min)
        .map(|cutoff| cutoff.letter.as_str())
        .ok_or(GradingError::UncoveredGrade { grade })
}

/// Assembles the printable final-grade report: student, grade to two
/// decimals, letter.
pub fn grade_report(
    gradebook: &Table,
    config: &GradeConfig,
) -> Result<Vec<GradeRow>, GradingError> {
    let (students, grades) = calc_grades(gradebook, config)?;

    students
        .into_iter()
        .zip(grades)
        .map(|(student, grade)| {
            let letter = letter_for(grade, config)?.to_string();
            Ok(GradeRow {
                student,
                grade: format!("{grade:.2}"),
                letter,
            })
        })
        .collect()
}
