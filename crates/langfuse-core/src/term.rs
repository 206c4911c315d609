use crate::env::{EnvLookup, ProcessEnv};
use is_terminal::IsTerminal;

/// Snapshot of the terminal environment, taken once per invocation.
#[derive(Debug, Clone, Copy)]
pub struct TermProbe {
    /// Interactive output, after `LANGFUSE_FORCE_TTY` is applied
    pub is_tty: bool,
    /// ANSI color allowed (`NO_COLOR` / `CLICOLOR` conventions)
    pub color: bool,
}

impl TermProbe {
    pub fn detect() -> Self {
        Self::from_parts(std::io::stdout().is_terminal(), &ProcessEnv)
    }

    /// Pure constructor used by `detect` and by tests.
    pub fn from_parts(raw_tty: bool, env: &impl EnvLookup) -> Self {
        let is_tty = env.var("LANGFUSE_FORCE_TTY").as_deref() == Some("1") || raw_tty;
        Self {
            is_tty,
            color: color_enabled(is_tty, env),
        }
    }
}

fn color_enabled(is_tty: bool, env: &impl EnvLookup) -> bool {
    if env.var("NO_COLOR").is_some() {
        return false;
    }
    if env.var("CLICOLOR").as_deref() == Some("0") {
        return false;
    }
    if env.var("CLICOLOR_FORCE").is_some() {
        return true;
    }
    is_tty
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn tty_gets_color_pipe_does_not() {
        let empty = env(&[]);
        assert!(TermProbe::from_parts(true, &empty).color);
        assert!(!TermProbe::from_parts(false, &empty).is_tty);
        assert!(!TermProbe::from_parts(false, &empty).color);
    }

    #[test]
    fn no_color_disables_color_but_not_tty() {
        let probe = TermProbe::from_parts(true, &env(&[("NO_COLOR", "1")]));
        assert!(probe.is_tty);
        assert!(!probe.color);
    }

    #[test]
    fn force_tty_overrides_detection() {
        let probe = TermProbe::from_parts(false, &env(&[("LANGFUSE_FORCE_TTY", "1")]));
        assert!(probe.is_tty);

        // Any other value is ignored
        let probe = TermProbe::from_parts(false, &env(&[("LANGFUSE_FORCE_TTY", "yes")]));
        assert!(!probe.is_tty);
    }

    #[test]
    fn clicolor_conventions() {
        assert!(!TermProbe::from_parts(true, &env(&[("CLICOLOR", "0")])).color);
        assert!(TermProbe::from_parts(false, &env(&[("CLICOLOR_FORCE", "1")])).color);
        // NO_COLOR wins over CLICOLOR_FORCE
        let both = env(&[("NO_COLOR", "x"), ("CLICOLOR_FORCE", "1")]);
        assert!(!TermProbe::from_parts(true, &both).color);
    }
}
