#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use itertools::{EitherOrBoth, Itertools};

use crate::constants::ZERO_WIDTH_SPACE;

/// Strips the zero-width spaces and surrounding whitespace that come with
/// strings in the Physics Classroom export.
pub fn sanitize(raw: &str) -> String {
    raw.replace(ZERO_WIDTH_SPACE, "").trim().to_string()
}

/// Formats `left` and `right` as two aligned columns under the given titles,
/// padded by position so a divergence between the lists stands out visually.
///
/// * `left`: first list, right-aligned
/// * `right`: second list
/// * `title_left`: heading for the first column
/// * `title_right`: heading for the second column
pub fn list_comparison(
    left: &[String],
    right: &[String],
    title_left: &str,
    title_right: &str,
) -> String {
    let width = left
        .iter()
        .map(String::len)
        .chain([title_left.len()])
        .max()
        .unwrap_or(0);

    let mut out = format!("{title_left:>width$}  {title_right}");
    out.push_str(&format!(
        "\n{:>width$}  {}",
        "-".repeat(title_left.len()),
        "-".repeat(title_right.len())
    ));

    for pair in left.iter().zip_longest(right.iter()) {
        let (a, b) = match pair {
            EitherOrBoth::Both(a, b) => (a.as_str(), b.as_str()),
            EitherOrBoth::Left(a) => (a.as_str(), ""),
            EitherOrBoth::Right(b) => ("", b.as_str()),
        };
        out.push_str(&format!("\n{a:>width$}  {b}"));
    }

    out
}
