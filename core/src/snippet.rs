use crate::{
    default_highlighter,
    util::{normalize_newlines, split_lines},
    Highlight,
};
use anyhow::{Context, Result};
use log::debug;
use std::{fs::read_to_string, path::Path};

pub const DEFAULT_CONTEXT_LINES: usize = 5;

/// Returns the lines of `file_path` surrounding `line_no`, highlighted if possible and prefixed
/// with line numbers.
///
/// The window covers the 0-based indices `line_no - context_lines_count` up to (but excluding)
/// `line_no + context_lines_count`, clamped to the file. A `line_no` of 0 or past the end of the
/// file yields a partial or empty snippet rather than an error.
///
/// `\r\n` and `\r` are read as `\n`. Form feeds and the other characters that end a line in
/// Unicode-aware text also start a new numbered line.
pub fn prepare_code_snippet(
    file_path: &Path,
    line_no: usize,
    context_lines_count: usize,
) -> Result<String> {
    prepare_code_snippet_with(
        &*default_highlighter(),
        file_path,
        line_no,
        context_lines_count,
    )
}

pub fn prepare_code_snippet_with(
    highlighter: &dyn Highlight,
    file_path: &Path,
    line_no: usize,
    context_lines_count: usize,
) -> Result<String> {
    let code = read_to_string(file_path)
        .map(|code| normalize_newlines(&code))
        .with_context(|| format!("Failed to read `{}`", file_path.display()))?;

    let code = match highlighter.highlight(file_path, &code) {
        Ok(highlighted) => highlighted,
        Err(error) => {
            debug!("Failed to highlight {file_path:?}: {error}");
            code
        }
    };

    let lines = split_lines(&code);
    let (start, end) = window(lines.len(), line_no, context_lines_count);

    Ok(lines[start..end]
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:4} | {line}", start + i + 1))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn window(n_lines: usize, line_no: usize, context_lines_count: usize) -> (usize, usize) {
    let end = line_no.saturating_add(context_lines_count).min(n_lines);
    let start = line_no.saturating_sub(context_lines_count).min(end);
    (start, end)
}
