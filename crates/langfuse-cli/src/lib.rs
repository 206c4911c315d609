// NOTE: Layering Rationale
//
// Why resolve configuration lazily (not in main)?
// - Usage errors must fail before any config file, keyring, or network access
// - `auth` commands need the profile name without a complete configuration
// - ExecutionContext memoizes the one resolution per invocation
//
// Why one OutputContext per run?
// - The table/TSV/JSON decision depends on flags, config, and TTY state;
//   deciding once means every handler observes the same mode and stdout is
//   never a mix of formats

mod args;
mod commands;
pub mod context;
mod diff;
mod handlers;
mod time;

pub use args::Cli;
pub use commands::run;
