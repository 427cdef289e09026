use std::collections::BTreeMap;

use pcgrade::{
    accumulate::PointsByAssignment,
    config::Rubric,
    error::GradingError,
    merge::{merge, roster},
    table::Table,
};

fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    )
    .expect("build table")
}

fn hw1_rubric() -> Rubric {
    Rubric::from_toml(
        r#"
        ["HW1"]
        points = 2
        bonus = 1
        tasks = ["T1", "T2", "T3"]
        "#,
    )
    .expect("parse rubric")
}

fn earned_for(assignment: &str, students: &[(&str, u32)]) -> PointsByAssignment {
    let mut by_student = BTreeMap::new();
    for (student, points) in students {
        by_student.insert(student.to_string(), *points);
    }
    let mut earned = PointsByAssignment::new();
    earned.insert(assignment.to_string(), by_student);
    earned
}

fn sample_gradebook() -> Table {
    table(
        &["Student", "ID", "HW1 (12345)"],
        &[
            &["Class Summary", "", ""],
            &["    Points Possible", "", "2"],
            &["Albertson, Alice", "101", ""],
            &["Bobson, Bob", "102", ""],
            &["Student, Test", "999", ""],
        ],
    )
}

#[test]
fn roster_skips_metadata_and_test_student() {
    let (sentinel_row, names) = roster(&sample_gradebook()).expect("extract roster");

    assert_eq!(sentinel_row, 1);
    assert_eq!(names, vec!["Albertson, Alice".to_string(), "Bobson, Bob".to_string()]);
}

#[test]
fn roster_requires_the_sentinel() {
    let gradebook = table(
        &["Student", "HW1 (12345)"],
        &[&["Albertson, Alice", ""], &["Bobson, Bob", ""]],
    );

    let err = roster(&gradebook).expect_err("expected a missing sentinel");
    assert!(matches!(err, GradingError::MissingSentinel));
}

#[test]
fn roster_requires_a_student_column() {
    let gradebook = table(&["Name", "HW1 (12345)"], &[&["    Points Possible", "2"]]);

    let err = roster(&gradebook).expect_err("expected a missing Student column");
    assert!(matches!(err, GradingError::MissingColumn { ref name } if name == "Student"));
}

#[test]
fn merges_points_into_the_matching_column() {
    let earned = earned_for("HW1", &[("Albertson, Alice", 3), ("Bobson, Bob", 1)]);

    let updated =
        merge(&earned, sample_gradebook(), &hw1_rubric()).expect("merge into gradebook");

    // Written for exactly the roster rows, in roster order.
    assert_eq!(updated.cell(2, 2), "3");
    assert_eq!(updated.cell(3, 2), "1");
    // Metadata, sentinel, and test-student rows untouched.
    assert_eq!(updated.cell(0, 2), "");
    assert_eq!(updated.cell(1, 2), "2");
    assert_eq!(updated.cell(4, 2), "");
}

#[test]
fn merged_column_reads_back_accumulated_values() {
    let earned = earned_for("HW1", &[("Albertson, Alice", 3), ("Bobson, Bob", 1)]);
    let updated =
        merge(&earned, sample_gradebook(), &hw1_rubric()).expect("merge into gradebook");

    let col = updated.columns_with_prefix("HW1")[0];
    let written: Vec<&str> = (2..4).map(|row| updated.cell(row, col)).collect();
    assert_eq!(written, vec!["3", "1"]);
}

#[test]
fn roster_mismatch_is_fatal() {
    // Accumulated {Alice, Bob} vs gradebook roster {Alice, Carol}.
    let gradebook = table(
        &["Student", "HW1 (12345)"],
        &[
            &["    Points Possible", "2"],
            &["Albertson, Alice", ""],
            &["Carlson, Carol", ""],
        ],
    );
    let earned = earned_for("HW1", &[("Albertson, Alice", 2), ("Bobson, Bob", 1)]);

    let err = merge(&earned, gradebook, &hw1_rubric()).expect_err("expected a roster mismatch");
    match err {
        GradingError::RosterMismatch {
            assignment,
            comparison,
        } => {
            assert_eq!(assignment, "HW1");
            assert!(comparison.contains("Physics Classroom"));
            assert!(comparison.contains("Canvas"));
            assert!(comparison.contains("Bobson, Bob"));
            assert!(comparison.contains("Carlson, Carol"));
        }
        other => panic!("expected RosterMismatch, got {other:?}"),
    }
}

#[test]
fn missing_destination_column_is_fatal() {
    let gradebook = table(
        &["Student", "Quiz 1 (444)"],
        &[&["    Points Possible", "2"], &["Albertson, Alice", ""]],
    );
    let earned = earned_for("HW1", &[("Albertson, Alice", 2)]);

    let err = merge(&earned, gradebook, &hw1_rubric()).expect_err("expected a missing column");
    assert!(matches!(err, GradingError::MissingColumn { ref name } if name == "HW1"));
}

#[test]
fn ambiguous_destination_column_is_fatal() {
    let gradebook = table(
        &["Student", "HW1 (12345)", "HW1 (67890)"],
        &[&["    Points Possible", "2", "2"], &["Albertson, Alice", "", ""]],
    );
    let earned = earned_for("HW1", &[("Albertson, Alice", 2)]);

    let err = merge(&earned, gradebook, &hw1_rubric()).expect_err("expected an ambiguous column");
    match err {
        GradingError::AmbiguousColumn { matches, .. } => {
            assert_eq!(matches, vec!["HW1 (12345)".to_string(), "HW1 (67890)".to_string()]);
        }
        other => panic!("expected AmbiguousColumn, got {other:?}"),
    }
}

#[test]
fn point_value_drift_is_fatal() {
    let gradebook = table(
        &["Student", "HW1 (12345)"],
        &[&["    Points Possible", "12"], &["Albertson, Alice", ""]],
    );
    let earned = earned_for("HW1", &[("Albertson, Alice", 2)]);

    let err = merge(&earned, gradebook, &hw1_rubric()).expect_err("expected point-value drift");
    assert!(matches!(
        err,
        GradingError::PointValueDrift {
            canvas: 12.0,
            expected: 2.0,
            ..
        }
    ));
}

#[test]
fn unreadable_points_possible_cell_is_fatal() {
    let gradebook = table(
        &["Student", "HW1 (12345)"],
        &[&["    Points Possible", "two"], &["Albertson, Alice", ""]],
    );
    let earned = earned_for("HW1", &[("Albertson, Alice", 2)]);

    let err = merge(&earned, gradebook, &hw1_rubric()).expect_err("expected a bad number");
    assert!(matches!(err, GradingError::BadNumber { ref value, .. } if value == "two"));
}

#[test]
fn unseen_assignment_surfaces_as_a_roster_mismatch() {
    // The rubric names an assignment the progress export never mentioned;
    // its empty accumulation cannot match a non-empty roster.
    let earned = PointsByAssignment::new();

    let err = merge(&earned, sample_gradebook(), &hw1_rubric())
        .expect_err("expected a roster mismatch for the unseen assignment");
    assert!(matches!(err, GradingError::RosterMismatch { ref assignment, .. } if assignment == "HW1"));
}
