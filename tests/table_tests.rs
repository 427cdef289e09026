use pcgrade::{
    table::Table,
    util::{list_comparison, sanitize},
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

#[test]
fn ragged_rows_are_rejected() {
    let result = Table::new(
        vec!["A".to_string(), "B".to_string()],
        vec![vec!["1".to_string()]],
    );

    assert!(result.is_err());
}

#[test]
fn column_lookup_is_exact() {
    let sheet = table(&["Student", " Student"], &[]);

    assert_eq!(sheet.column_index("Student"), Some(0));
    assert_eq!(sheet.column_index(" Student"), Some(1));
    assert_eq!(sheet.column_index("student"), None);
}

#[test]
fn prefix_lookup_returns_every_match() {
    let sheet = table(&["Student", "HW1 (12345)", "HW10 (222)", "Quiz 1 (3)"], &[]);

    assert_eq!(sheet.columns_with_prefix("HW1"), vec![1, 2]);
    assert_eq!(sheet.columns_with_prefix("Quiz 1"), vec![3]);
    assert!(sheet.columns_with_prefix("Lab").is_empty());
}

#[test]
fn cells_can_be_read_and_overwritten() {
    let mut sheet = table(&["A", "B"], &[&["1", "2"], &["3", "4"]]);

    assert_eq!(sheet.cell(1, 0), "3");
    sheet.set_cell(1, 0, "30".to_string());
    assert_eq!(sheet.cell(1, 0), "30");
    assert_eq!(sheet.cell(1, 1), "4");
}

#[test]
fn column_values_walk_top_to_bottom() {
    let sheet = table(&["A"], &[&["x"], &["y"], &["z"]]);

    let values: Vec<&str> = sheet.column_values(0).collect();
    assert_eq!(values, vec!["x", "y", "z"]);
}

#[test]
fn sanitize_strips_zero_width_spaces_and_padding() {
    assert_eq!(sanitize("\u{200B}Momentum \u{200B}"), "Momentum");
    assert_eq!(sanitize("  plain  "), "plain");
    assert_eq!(sanitize(""), "");
}

#[test]
fn list_comparison_aligns_by_position() {
    let left = vec!["a".to_string(), "bb".to_string()];
    let right = vec!["ccc".to_string()];

    let listing = list_comparison(&left, &right, "Expected", "Found");

    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines[0], "Expected  Found");
    assert_eq!(lines[1], "--------  -----");
    assert_eq!(lines[2], "       a  ccc");
    assert_eq!(lines[3], "      bb  ");
}
