use std::collections::HashMap;

/// Read access to environment variables.
///
/// Config resolution and terminal probing take this as a parameter instead of
/// touching `std::env` directly, so precedence tests can exercise arbitrary
/// variable combinations without mutating process state.
pub trait EnvLookup {
    /// Returns the variable's value, treating empty strings as unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty()).cloned()
    }
}
