// NOTE: Command Organization Rationale
//
// Why namespaced subcommands (not flat)?
// - One namespace per platform resource (traces, observations, sessions,
//   scores, prompts, datasets, experiments, auth)
// - `lf traces list` / `lf traces tree` read better than `list-traces`
// - Keeps --help scannable as resources grow
//
// Format-relevant flags (--json, --fields, --jq, --quiet) are global so they
// apply uniformly to every subcommand; the --fields/--jq conflict is declared
// here and clap rejects it before any configuration or network work happens.

mod commands;

pub use commands::*;

use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(name = "lf")]
#[command(about = "Query traces, prompts, and scores from the Langfuse platform", long_about = None)]
// -v is used for the version (not verbosity), so the built-in flag is
// replaced with an explicit one.
#[command(version, disable_version_flag = true)]
pub struct Cli {
    #[arg(short = 'v', long, action = ArgAction::Version, help = "Print version")]
    version: Option<bool>,

    #[arg(long, global = true, help = "Langfuse host URL")]
    pub host: Option<String>,

    #[arg(long, global = true, help = "Named profile from the config file")]
    pub profile: Option<String>,

    #[arg(long, global = true, help = "Emit results as a JSON array")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        value_delimiter = ',',
        conflicts_with = "jq",
        help = "Project each record to these fields (implies --json; dot paths allowed)"
    )]
    pub fields: Option<Vec<String>>,

    #[arg(
        long,
        global = true,
        help = "Pipe the JSON output through a jq expression (implies --json)"
    )]
    pub jq: Option<String>,

    #[arg(short = 'q', long, global = true, help = "Suppress status messages")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}
