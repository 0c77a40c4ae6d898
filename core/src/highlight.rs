//! Optional syntax highlighting for code snippets.
//!
//! Highlighting is compiled in with the `highlight` feature. Without it, [`default_highlighter`]
//! returns [`PlainText`], which leaves code untouched.

use anyhow::Result;
use std::path::Path;

pub trait Highlight {
    /// Highlights `code`, using `path` to choose a syntax. Implementations must not add or remove
    /// lines.
    fn highlight(&self, path: &Path, code: &str) -> Result<String>;
}

/// Leaves code as is.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainText;

impl Highlight for PlainText {
    fn highlight(&self, _path: &Path, code: &str) -> Result<String> {
        Ok(code.to_owned())
    }
}

#[cfg(feature = "highlight")]
pub use terminal::{Terminal, DEFAULT_THEME};

/// Whether this build can produce highlighted output.
#[must_use]
pub fn is_available() -> bool {
    cfg!(feature = "highlight")
}

#[cfg(feature = "highlight")]
#[must_use]
pub fn default_highlighter() -> Box<dyn Highlight> {
    match Terminal::new() {
        Ok(terminal) => Box::new(terminal),
        Err(error) => {
            log::debug!("Falling back to plain text: {error}");
            Box::new(PlainText)
        }
    }
}

#[cfg(not(feature = "highlight"))]
#[must_use]
pub fn default_highlighter() -> Box<dyn Highlight> {
    Box::new(PlainText)
}

#[cfg(feature = "highlight")]
mod terminal {
    use super::Highlight;
    use crate::util::lines_with_endings;
    use anyhow::{anyhow, Result};
    use once_cell::sync::Lazy;
    use std::{ffi::OsStr, path::Path};
    use syntect::{
        easy::HighlightLines,
        highlighting::{Theme, ThemeSet},
        parsing::{SyntaxReference, SyntaxSet},
        util::as_24_bit_terminal_escaped,
    };

    pub const DEFAULT_THEME: &str = "base16-ocean.dark";

    const RESET: &str = "\x1b[0m";

    static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
    static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

    /// Highlights with 24-bit terminal escape codes.
    #[derive(Clone, Copy, Debug)]
    pub struct Terminal {
        theme: &'static Theme,
    }

    impl Terminal {
        pub fn new() -> Result<Self> {
            Self::with_theme(DEFAULT_THEME)
        }

        pub fn with_theme(name: &str) -> Result<Self> {
            let theme = Lazy::force(&THEME_SET)
                .themes
                .get(name)
                .ok_or_else(|| anyhow!("Unknown theme `{name}`"))?;
            Ok(Self { theme })
        }
    }

    impl Highlight for Terminal {
        fn highlight(&self, path: &Path, code: &str) -> Result<String> {
            let syntax_set = Lazy::force(&SYNTAX_SET);
            let mut highlighter = HighlightLines::new(syntax_for(syntax_set, path), self.theme);

            let mut highlighted = String::with_capacity(code.len() * 2);
            let mut line = String::new();
            for (content, ending) in lines_with_endings(code) {
                // The syntaxes expect every line to end with `\n`, whatever the original ending.
                line.clear();
                line.push_str(content);
                line.push('\n');
                let ranges = highlighter
                    .highlight_line(&line, syntax_set)?
                    .into_iter()
                    .map(|(style, text)| (style, text.trim_end_matches('\n')))
                    .collect::<Vec<_>>();
                highlighted.push_str(&as_24_bit_terminal_escaped(&ranges, false));
                highlighted.push_str(RESET);
                highlighted.push_str(ending);
            }

            Ok(highlighted)
        }
    }

    /// Chooses a syntax by file name (e.g., `Makefile`), then by extension, then falls back to
    /// plain text.
    fn syntax_for<'a>(syntax_set: &'a SyntaxSet, path: &Path) -> &'a SyntaxReference {
        let by_extension = |s: Option<&OsStr>| {
            s.and_then(OsStr::to_str)
                .and_then(|s| syntax_set.find_syntax_by_extension(s))
        };
        by_extension(path.file_name())
            .or_else(|| by_extension(path.extension()))
            .unwrap_or_else(|| syntax_set.find_syntax_plain_text())
    }

}
