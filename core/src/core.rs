use crate::{
    default_highlighter, highlight, note, prepare_code_snippet_with, pretty_format_path, warn,
    warn::style, BuildConfig, DocsPaths, Highlight, PlainText, ProviderYamlLoader, WarnFlags,
    Warning, CONSOLE_WIDTH, PROCESS_TIMEOUT, SITE_DIRECTORY_ENV,
};
use ansi_term::Style;
use anyhow::{ensure, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::{
    env::current_dir,
    path::{Path, PathBuf},
};

pub struct LightContext<'a> {
    pub opts: &'a DocsBuild,
    pub println: &'a dyn Fn(&dyn AsRef<str>),
}

#[derive(Clone, Debug, Default)]
pub enum Command {
    /// Show the lines of `file` around `line_no`.
    Snippet {
        file: PathBuf,
        line_no: usize,
        context_lines_count: usize,
        plain: bool,
    },
    /// Show `path` relative to `start` (the current directory if `None`).
    Relpath { path: String, start: Option<String> },
    /// Show the project's paths and configuration.
    #[default]
    Paths,
}

#[derive(Clone, Debug, Default)]
pub struct DocsBuild {
    pub allow: Vec<Warning>,
    pub deny: Vec<Warning>,
    pub quiet: bool,
    pub root: Option<PathBuf>,
    pub command: Command,
}

/// The command line tool's entrypoint.
pub fn docs_build(opts: &DocsBuild) -> Result<()> {
    process_options(opts)?;

    let println = |msg: &dyn AsRef<str>| {
        println!("{}", msg.as_ref());
    };

    let context = LightContext {
        opts,
        println: &println,
    };

    run(&context)
}

fn process_options(opts: &DocsBuild) -> Result<()> {
    for warning in &opts.allow {
        ensure!(
            !opts.deny.contains(warning),
            "--allow {warning} and --deny {warning} are incompatible"
        );
    }

    Ok(())
}

fn run(context: &LightContext) -> Result<()> {
    match &context.opts.command {
        Command::Snippet {
            file,
            line_no,
            context_lines_count,
            plain,
        } => snippet(context, file, *line_no, *context_lines_count, *plain),
        Command::Relpath { path, start } => relpath(context, path, start.as_deref()),
        Command::Paths => paths(context),
    }
}

fn snippet(
    context: &LightContext,
    file: &Path,
    line_no: usize,
    context_lines_count: usize,
    plain: bool,
) -> Result<()> {
    let highlighter: Box<dyn Highlight> = if plain || !std::io::stdout().is_terminal() {
        Box::new(PlainText)
    } else {
        if !highlight::is_available() {
            warn(
                context,
                Warning::HighlightingUnavailable,
                "This build cannot highlight code; showing plain text",
                WarnFlags::ONCE,
            )?;
        }
        default_highlighter()
    };

    let snippet = prepare_code_snippet_with(&*highlighter, file, line_no, context_lines_count)?;

    let cwd = current_dir()?;
    let header = pretty_format_path(&file.to_string_lossy(), &cwd.to_string_lossy());
    (context.println)(
        &style(Style::new().bold())
            .paint(format!("{header}:{line_no}"))
            .to_string(),
    );

    if snippet.is_empty() {
        note(context, "No lines to show");
    } else {
        (context.println)(&snippet);
    }

    Ok(())
}

fn relpath(context: &LightContext, path: &str, start: Option<&str>) -> Result<()> {
    let start = match start {
        Some(start) => start.to_owned(),
        None => current_dir()?.to_string_lossy().into_owned(),
    };

    (context.println)(&pretty_format_path(path, &start));

    Ok(())
}

fn paths(context: &LightContext) -> Result<()> {
    let root = context
        .opts
        .root
        .clone()
        .map_or_else(current_dir, Ok)?;

    debug!("Loading configuration for {root:?}");

    let paths = DocsPaths::from_root(&root)?;
    let loader = ProviderYamlLoader::new(paths.providers_dir());
    let config = BuildConfig::load(paths, &loader)?;

    for (key, value) in [
        ("content root", &config.paths.content_root),
        ("devel-common", &config.paths.devel_common),
        ("generated", &config.paths.generated),
        ("docs sources", &config.paths.docs_sources),
    ] {
        (context.println)(&format!("{key}: {}", value.display()));
    }

    (context.println)(&format!(
        "site directory: {}",
        config
            .site_directory()
            .map_or_else(|| String::from("<unset>"), |dir| dir.display().to_string())
    ));
    (context.println)(&format!("process timeout: {}s", PROCESS_TIMEOUT.as_secs()));
    (context.println)(&format!("console width: {CONSOLE_WIDTH}"));
    (context.println)(&format!(
        "providers: {} ({} including suspended)",
        config.providers.len(),
        config.providers_with_suspended.len()
    ));

    if config.site_directory().is_none() {
        warn(
            context,
            Warning::SiteDirectoryUnset,
            &format!("{SITE_DIRECTORY_ENV} is not set"),
            WarnFlags::empty(),
        )?;
    }

    Ok(())
}
