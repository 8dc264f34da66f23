//! Go comment formatting for documentation strings.

/// Default line width for generated comments, indentation included.
pub const DEFAULT_DOC_WIDTH: usize = 80;

const COMMENT_MARKER: &str = "// ";
const TAB_WIDTH: usize = 4;
const MIN_TEXT_WIDTH: usize = 20;

/// Turn free-form documentation into Go line comments.
///
/// Source lines are trimmed, blank lines dropped and long lines wrapped so the
/// comment fits in `width` columns. Every line is prefixed with `indent` tabs
/// and `// `. With `skip_first_marker` the first line is left bare, for
/// templates that place it right after the documented item name.
pub fn prepare_docs(src: &str, skip_first_marker: bool, indent: usize, width: usize) -> String {
    let prefix = format!("{}{COMMENT_MARKER}", "\t".repeat(indent));
    let text_width = width
        .saturating_sub(indent * TAB_WIDTH + COMMENT_MARKER.len())
        .max(MIN_TEXT_WIDTH);

    let mut lines: Vec<String> = src
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .flat_map(|line| textwrap::wrap(line, text_width))
        .map(|wrapped| format!("{prefix}{wrapped}"))
        .collect();

    if skip_first_marker && let Some(first) = lines.first_mut() {
        first.replace_range(..prefix.len(), "");
    }

    lines.join("\n")
}
