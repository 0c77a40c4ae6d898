use crate::LightContext;
use ansi_term::{
    Color::{Green, Yellow},
    Style,
};
use anyhow::{bail, Result};
use bitflags::bitflags;
use heck::ToKebabCase;
use is_terminal::IsTerminal;
use once_cell::sync::Lazy;
use std::{collections::BTreeMap, sync::Mutex};

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[non_exhaustive]
#[remain::sorted]
pub enum Warning {
    All,
    HighlightingUnavailable,
    SiteDirectoryUnset,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{self:?}").to_kebab_case())
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Flags: u8 {
        const ONCE = 1 << 0;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    struct State: u8 {
        const ALLOW_MSG_EMITTED = 1 << 0;
        const WARNING_EMITTED = 1 << 1;
    }
}

static WARNING_STATE_MAP: Lazy<Mutex<BTreeMap<Warning, State>>> =
    Lazy::new(|| Mutex::new(BTreeMap::new()));

pub(crate) fn warn(
    context: &LightContext,
    warning: Warning,
    msg: &str,
    flags: Flags,
) -> Result<()> {
    assert_ne!(warning, Warning::All);

    if context.opts.deny.contains(&Warning::All) || context.opts.deny.contains(&warning) {
        bail!(msg.to_owned());
    }

    if context.opts.quiet
        || context.opts.allow.contains(&Warning::All)
        || context.opts.allow.contains(&warning)
    {
        return Ok(());
    }

    #[allow(clippy::unwrap_used)]
    let mut warning_state_map = WARNING_STATE_MAP.lock().unwrap();

    let state = warning_state_map
        .entry(warning)
        .or_insert_with(State::empty);

    if flags.contains(Flags::ONCE) && state.contains(State::WARNING_EMITTED) {
        return Ok(());
    }

    let allow_msg = if state.contains(State::ALLOW_MSG_EMITTED) {
        String::new()
    } else {
        state.insert(State::ALLOW_MSG_EMITTED);
        format!(
            "
Silence this warning with: --allow {warning}"
        )
    };

    (context.println)(&format!(
        "{}: {}{}",
        style(Yellow.bold()).paint("Warning"),
        msg,
        allow_msg
    ));

    state.insert(State::WARNING_EMITTED);

    Ok(())
}

pub(crate) fn note(context: &LightContext, msg: &str) {
    if context.opts.quiet {
        return;
    }

    (context.println)(&format!("{}: {}", style(Green.bold()).paint("Note"), msg));
}

pub(crate) fn style(style: Style) -> Style {
    if std::io::stdout().is_terminal() {
        style
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::DocsBuild;
    use std::cell::RefCell;

    fn collect(
        opts: &DocsBuild,
        f: impl FnOnce(&LightContext) -> Result<()>,
    ) -> (Result<()>, Vec<String>) {
        let lines = RefCell::new(Vec::new());
        let println = |msg: &dyn AsRef<str>| lines.borrow_mut().push(msg.as_ref().to_owned());
        let context = LightContext {
            opts,
            println: &println,
        };
        let result = f(&context);
        (result, lines.into_inner())
    }

    #[test]
    fn display_is_kebab_case() {
        assert_eq!(
            Warning::HighlightingUnavailable.to_string(),
            "highlighting-unavailable"
        );
        assert_eq!(Warning::SiteDirectoryUnset.to_string(), "site-directory-unset");
    }

    #[test]
    fn deny_is_an_error() {
        let opts = DocsBuild {
            deny: vec![Warning::SiteDirectoryUnset],
            ..Default::default()
        };

        let (result, lines) = collect(&opts, |context| {
            warn(
                context,
                Warning::SiteDirectoryUnset,
                "site directory is not set",
                Flags::empty(),
            )
        });

        assert_eq!(result.unwrap_err().to_string(), "site directory is not set");
        assert!(lines.is_empty());
    }

    #[test]
    fn allow_all_and_quiet_silence() {
        for opts in [
            DocsBuild {
                allow: vec![Warning::All],
                ..Default::default()
            },
            DocsBuild {
                quiet: true,
                ..Default::default()
            },
        ] {
            let (result, lines) = collect(&opts, |context| {
                warn(
                    context,
                    Warning::HighlightingUnavailable,
                    "msg",
                    Flags::empty(),
                )?;
                note(context, "msg");
                Ok(())
            });
            result.unwrap();
            assert!(lines.is_empty(), "{lines:?}");
        }
    }
}
