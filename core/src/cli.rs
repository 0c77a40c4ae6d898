use crate::{Command, DocsBuild, Warning, DEFAULT_CONTEXT_LINES};
use clap::{crate_version, ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(version = crate_version!())]
#[remain::sorted]
pub struct Opts {
    #[clap(
        long,
        action = ArgAction::Append,
        global = true,
        hide_possible_values = true,
        value_name = "WARNING",
        help = "Silence <WARNING>; `--allow all` silences all warnings"
    )]
    allow: Vec<Warning>,
    #[clap(
        long,
        action = ArgAction::Append,
        global = true,
        hide_possible_values = true,
        value_name = "WARNING",
        help = "Treat <WARNING> as an error; `--deny all` treats all warnings as errors"
    )]
    deny: Vec<Warning>,
    #[clap(long, global = true, help = "Do not output warnings or notes")]
    quiet: bool,
    #[clap(
        long,
        global = true,
        help = "Root directory of the documentation project; defaults to the current directory"
    )]
    root: Option<String>,
    #[clap(subcommand)]
    #[remain::unsorted]
    command: Subcommands,
}

#[derive(Debug, Subcommand)]
#[remain::sorted]
enum Subcommands {
    #[clap(about = "Show the project's paths and configuration")]
    Paths,
    #[clap(about = "Show <PATH> relative to <START> the way build messages do")]
    Relpath {
        #[clap(value_name = "PATH")]
        path: String,
        #[clap(
            value_name = "START",
            help = "Base directory; defaults to the current directory"
        )]
        start: Option<String>,
    },
    #[clap(about = "Show the lines of <FILE> surrounding <LINE>")]
    Snippet {
        #[clap(
            long,
            default_value_t = DEFAULT_CONTEXT_LINES,
            help = "Number of lines of context"
        )]
        context: usize,
        #[clap(value_name = "FILE")]
        file: String,
        #[clap(value_name = "LINE", help = "1-based line number")]
        line: usize,
        #[clap(long, help = "Do not highlight code")]
        plain: bool,
    },
}

impl From<Opts> for DocsBuild {
    fn from(opts: Opts) -> Self {
        let Opts {
            allow,
            deny,
            quiet,
            root,
            command,
        } = opts;
        let root = root.map(PathBuf::from);
        let command = match command {
            Subcommands::Paths => Command::Paths,
            Subcommands::Relpath { path, start } => Command::Relpath { path, start },
            Subcommands::Snippet {
                context,
                file,
                line,
                plain,
            } => Command::Snippet {
                file: PathBuf::from(file),
                line_no: line,
                context_lines_count: context,
                plain,
            },
        };
        Self {
            allow,
            deny,
            quiet,
            root,
            command,
        }
    }
}
