#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use thiserror::Error;

/// A fatal reconciliation failure. Every variant means the output would
/// misgrade a student, so none of these are ever downgraded to warnings and
/// no output file is written once one is raised.
#[derive(Debug, Error)]
pub enum GradingError {
    /// A rubric entry claims a task that another entry already claims.
    #[error("Task '{task}' is claimed by both '{first}' and '{second}' in the rubric")]
    DuplicateTask {
        /// The doubly-claimed task name.
        task:   String,
        /// Assignment that claimed the task first.
        first:  String,
        /// Assignment that claimed it again.
        second: String,
    },
    /// The tasks observed for a student do not match the rubric's declared
    /// task set for the assignment.
    #[error("Got unexpected tasks for assignment '{assignment}', student '{student}':\n{comparison}")]
    TaskSetMismatch {
        /// Assignment being validated.
        assignment: String,
        /// Student whose rows disagreed.
        student:    String,
        /// Aligned expected-vs-found listing, both sides sorted.
        comparison: String,
    },
    /// The number of non-bonus sub-parts seen differs from the rubric.
    #[error(
        "Found {found} for the maximum possible non-bonus points (instead of {expected}) for \
         assignment '{assignment}', student '{student}'"
    )]
    RegularCountMismatch {
        /// Assignment being validated.
        assignment: String,
        /// Student whose rows disagreed.
        student:    String,
        /// The rubric's declared `points`.
        expected:   f64,
        /// Non-bonus sub-parts counted from the export.
        found:      u32,
    },
    /// The number of bonus sub-parts seen differs from the rubric.
    #[error(
        "Found {found} for the maximum possible bonus points (instead of {expected}) for \
         assignment '{assignment}', student '{student}'"
    )]
    BonusCountMismatch {
        /// Assignment being validated.
        assignment: String,
        /// Student whose rows disagreed.
        student:    String,
        /// The rubric's declared `bonus`.
        expected:   f64,
        /// Bonus sub-parts counted from the export.
        found:      u32,
    },
    /// A student somehow earned more points than the assignment allows.
    /// Unreachable once the count checks pass, but cheap to keep.
    #[error(
        "Student '{student}' has {earned} points on assignment '{assignment}', but the maximum \
         possible should be {maximum}"
    )]
    OverMaximum {
        /// Assignment being validated.
        assignment: String,
        /// Student over the cap.
        student:    String,
        /// Points the student accumulated.
        earned:     u32,
        /// `points + bonus` from the rubric.
        maximum:    f64,
    },
    /// The gradebook has no "Points Possible" row in its Student column.
    #[error("No \"    Points Possible\" row found in the gradebook's Student column")]
    MissingSentinel,
    /// A named column is absent from the gradebook.
    #[error("No gradebook column matches '{name}'")]
    MissingColumn {
        /// The column name (or assignment-name prefix) looked for.
        name: String,
    },
    /// More than one gradebook column starts with the assignment name.
    #[error("Multiple columns ({matches:?}) match assignment '{assignment}'")]
    AmbiguousColumn {
        /// Assignment whose destination column was looked up.
        assignment: String,
        /// Every column name that matched.
        matches:    Vec<String>,
    },
    /// The accumulated students differ from the gradebook roster.
    #[error("Inconsistent students for assignment '{assignment}':\n{comparison}")]
    RosterMismatch {
        /// Assignment being merged.
        assignment: String,
        /// Aligned listing of both rosters, padded by position.
        comparison: String,
    },
    /// The gradebook's declared point value disagrees with the rubric.
    #[error("Canvas spreadsheet shows '{assignment}' worth {canvas}, expected {expected}")]
    PointValueDrift {
        /// Assignment being merged.
        assignment: String,
        /// Value in the gradebook's Points Possible row.
        canvas:     f64,
        /// The rubric's declared `points`.
        expected:   f64,
    },
    /// A cell that should hold a number does not parse as one.
    #[error("Could not parse '{value}' in column '{column}' (row '{row}') as a number")]
    BadNumber {
        /// Column the cell belongs to.
        column: String,
        /// Student (or sentinel) labelling the row.
        row:    String,
        /// The offending cell contents.
        value:  String,
    },
    /// A unit's Final Score and Current Score disagree outside the tolerated
    /// zero/NaN case.
    #[error(
        "'Current Score' ({current}) differs from 'Final Score' ({final_score}) for unit \
         '{unit}', student '{student}'"
    )]
    ScoreDisagreement {
        /// Unit whose scores were compared.
        unit:        String,
        /// Student the row belongs to.
        student:     String,
        /// The unit's Final Score cell.
        final_score: f64,
        /// The unit's Current Score cell.
        current:     f64,
    },
    /// The final-grade config lists no units to average.
    #[error("Final-grade config lists no units")]
    NoUnits,
    /// A computed grade falls outside every configured letter cutoff.
    #[error("Grade {grade} not covered in config")]
    UncoveredGrade {
        /// The uncovered numeric grade.
        grade: f64,
    },
}
