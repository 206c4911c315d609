pub mod config;
pub mod env;
pub mod output;
pub mod secrets;
pub mod term;
pub mod tree;

pub use config::{ConfigFile, ConfigOverrides, EffectiveConfig, DEFAULT_HOST, DEFAULT_LIMIT};
pub use env::{EnvLookup, ProcessEnv};
pub use output::{OutputContext, OutputFormat, OutputMode, RenderOptions, select_mode};
pub use secrets::{KEYRING_SERVICE, KeyringStore, MemoryStore, SecretKey, SecretRef, SecretStore};
pub use term::TermProbe;
pub use tree::{Forest, build_forest, render_trace_tree};
