use crate::term::TermProbe;
use serde::{Deserialize, Serialize};

/// Default output format a profile can pin in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

/// Concrete rendering mode for one invocation.
///
/// Derived, never stored: recomputed from flags and terminal state each run
/// so every component observes the same decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Tsv,
    Json,
}

/// Format-relevant global flags.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub json: bool,
    pub fields: Option<Vec<String>>,
    pub jq: Option<String>,
    pub quiet: bool,
}

impl RenderOptions {
    /// `--fields` and `--jq` imply `--json`.
    pub fn json_requested(&self) -> bool {
        self.json || self.fields.is_some() || self.jq.is_some()
    }
}

/// The single mode-decision function. Evaluated in order, first match wins:
/// explicit JSON flags, configured default format, non-interactive stream,
/// then the interactive table.
pub fn select_mode(
    options: &RenderOptions,
    default_format: OutputFormat,
    probe: &TermProbe,
) -> OutputMode {
    if options.json_requested() || default_format == OutputFormat::Json {
        return OutputMode::Json;
    }
    if !probe.is_tty || default_format == OutputFormat::Tsv {
        return OutputMode::Tsv;
    }
    OutputMode::Table
}
