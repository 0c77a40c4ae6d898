use log::debug;
use std::{
    env::current_dir,
    io,
    path::{Component, Path, PathBuf},
};

/// Characters that end a line, in addition to `\r` and `\r\n`.
const LINE_BREAKS: &[char] = &[
    '\n', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub(crate) fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Splits `text` into `(content, ending)` pairs. Besides `\n`, `\r\n` and `\r`, the vertical
/// tab, form feed, file/group/record separators, NEL and the Unicode line and paragraph
/// separators end a line. The last pair's ending is empty if `text` does not end with a line
/// break.
pub(crate) fn lines_with_endings(text: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(i) = rest.find(|c: char| c == '\r' || LINE_BREAKS.contains(&c)) else {
            let content = rest;
            rest = "";
            return Some((content, ""));
        };
        let tail = &rest[i..];
        let len = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        let (content, ending) = (&rest[..i], &tail[..len]);
        rest = &tail[len..];
        Some((content, ending))
    })
}

/// Splits `text` into lines without their endings. A trailing line break does not start a new,
/// empty line.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    lines_with_endings(text).map(|(content, _)| content).collect()
}

/// Formats `path` for display as `{start}/{relative path from start}`.
///
/// `path` is returned unchanged when it has no relative form with respect to `start` (e.g., the
/// two are on different drives), or when the relative form is `path` itself. Relative inputs are
/// interpreted against the current directory; if it cannot be determined, `path` is returned
/// unchanged. The filesystem is not consulted.
#[must_use]
pub fn pretty_format_path(path: &str, start: &str) -> String {
    pretty_format_path_from(current_dir(), path, start)
}

fn pretty_format_path_from(cwd: io::Result<PathBuf>, path: &str, start: &str) -> String {
    match cwd {
        Ok(cwd) => pretty_format_path_in(&cwd, path, start),
        Err(error) => {
            debug!("Failed to get current directory: {error}");
            path.to_owned()
        }
    }
}

fn pretty_format_path_in(cwd: &Path, path: &str, start: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    match relative_path(cwd, Path::new(path), Path::new(start)) {
        Some(relpath) if relpath.as_os_str() != path => {
            format!("{start}/{}", relpath.to_string_lossy())
        }
        _ => path.to_owned(),
    }
}

fn relative_path(cwd: &Path, path: &Path, start: &Path) -> Option<PathBuf> {
    let path = normalize(&cwd.join(path));
    let start = normalize(&cwd.join(start));

    if path.components().next() != start.components().next() {
        return None;
    }

    let relpath = pathdiff::diff_paths(path, start)?;

    if relpath.as_os_str().is_empty() {
        Some(PathBuf::from(Component::CurDir.as_os_str()))
    } else {
        Some(relpath)
    }
}

/// Lexically removes `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component);
            }
        }
    }
    normalized
}
