#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::panic)]

#[cfg(feature = "clap")]
pub mod cli;

mod config;
pub use config::{
    site_directory_from_env, BuildConfig, CONSOLE_WIDTH, PROCESS_TIMEOUT, SITE_DIRECTORY_ENV,
};

mod core;
pub use crate::core::{docs_build, Command, DocsBuild};
use crate::core::LightContext;

pub mod highlight;
pub use highlight::{default_highlighter, Highlight, PlainText};

mod paths;
pub use paths::{DocsPaths, CONTENT_ROOT_DEPTH};

mod providers;
pub use providers::{PackageDataLoader, ProviderInfo, ProviderState, ProviderYamlLoader};

mod snippet;
pub use snippet::{prepare_code_snippet, prepare_code_snippet_with, DEFAULT_CONTEXT_LINES};

pub mod util;
pub use util::pretty_format_path;

mod warn;
pub use warn::{Flags as WarnFlags, Warning};
use warn::{note, warn};
