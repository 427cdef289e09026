#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Marker row in the Canvas gradebook's `Student` column that separates
/// header/metadata rows from the actual roster. Canvas pads it with leading
/// spaces; the match is exact, padding included.
pub const POINTS_POSSIBLE_SENTINEL: &str = "    Points Possible";

/// Placeholder student Canvas appends to the end of the roster. Excluded from
/// reconciliation when present.
pub const TEST_STUDENT_SENTINEL: &str = "Student, Test";

/// Name of the gradebook column holding student names.
pub const STUDENT_COLUMN: &str = "Student";

/// Section labels (sanitized, lowercased) that mark a concept-builder
/// sub-part as bonus content.
pub const BONUS_SECTION_LABELS: [&str; 2] = ["wizard level", "wizard"];

/// Zero-width space that Physics Classroom sprinkles into exported task and
/// student names.
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Header names expected in the "Detailed Progress" export, in no particular
/// column order.
pub const PROGRESS_HEADERS: [&str; 4] = ["Task", "Student", "Section", "Completed"];

/// Column-name suffix for a unit's posted score.
pub const FINAL_SCORE_SUFFIX: &str = " Final Score";

/// Column-name suffix for a unit's running score.
pub const CURRENT_SCORE_SUFFIX: &str = " Current Score";

/// Default assignment rubric, used when no `--assignments-file` is given.
pub const DEFAULT_RUBRIC: &str = include_str!("configs/assignments.toml");

/// Default final-grade configuration, used when no `--config-file` is given.
pub const DEFAULT_GRADE_CONFIG: &str = include_str!("configs/final_grades.toml");
