//! Configuration resolution: flags -> env -> config file -> keyring -> defaults.
//!
//! Precedence is evaluated independently per field with an ordered lookup
//! chain, first present source wins. A merged-dictionary approach would lose
//! per-field provenance, so each field walks its own chain.

use crate::env::EnvLookup;
use crate::output::OutputFormat;
use crate::secrets::{SecretKey, SecretRef};
use langfuse_types::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "https://cloud.langfuse.com";
pub const DEFAULT_LIMIT: usize = 50;

pub const ENV_HOST: &str = "LANGFUSE_HOST";
pub const ENV_BASEURL: &str = "LANGFUSE_BASEURL";
pub const ENV_PUBLIC_KEY: &str = "LANGFUSE_PUBLIC_KEY";
pub const ENV_SECRET_KEY: &str = "LANGFUSE_SECRET_KEY";
pub const ENV_PROFILE: &str = "LANGFUSE_PROFILE";

/// One named connection bundle in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    // Readable if a user put it here, but never written back by the CLI.
    #[serde(skip_serializing)]
    pub secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputFormat>,
}

/// Parsed `config.toml`: a `[default]` profile, a `[profiles.NAME]`
/// namespace, and option defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub default: ProfileSection,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, ProfileSection>,
    #[serde(default)]
    pub defaults: DefaultsSection,
}

impl ConfigFile {
    /// Per-user config path: `$XDG_CONFIG_HOME/langfuse/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::Config("could not determine config directory".to_string()))?;
        Ok(base.join("langfuse").join("config.toml"))
    }

    /// Load the file, treating a missing file as an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Internal(anyhow::anyhow!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn profile(&self, name: &str) -> Option<&ProfileSection> {
        if name == "default" {
            Some(&self.default)
        } else {
            self.profiles.get(name)
        }
    }

    pub fn profile_mut(&mut self, name: &str) -> &mut ProfileSection {
        if name == "default" {
            &mut self.default
        } else {
            self.profiles.entry(name.to_string()).or_default()
        }
    }
}

/// Values supplied on the command line, the highest-precedence source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub public_key: Option<String>,
    pub secret_key: Option<String>,
    pub profile: Option<String>,
    pub limit: Option<usize>,
    pub output: Option<OutputFormat>,
}

/// The single fully-resolved settings object for one invocation.
///
/// Constructed once, immutable, never persisted. Every field has exactly one
/// winning source; nothing is a merge of two sources.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub host: String,
    pub public_key: String,
    pub secret_key: SecretKey,
    pub profile: String,
    pub default_limit: usize,
    pub default_output: OutputFormat,
}

impl EffectiveConfig {
    /// Resolve against the process environment and the on-disk config file.
    pub fn resolve(overrides: &ConfigOverrides, env: &impl EnvLookup) -> Result<Self> {
        let file = ConfigFile::load_from(&ConfigFile::default_path()?)?;
        Self::resolve_with(overrides, env, &file)
    }

    /// Pure resolution over explicit sources.
    ///
    /// The secret store is deliberately absent here: the secret-key slot
    /// stays a deferred keyring reference unless a higher source provided a
    /// value, so the store is only touched when credentials are used.
    pub fn resolve_with(
        overrides: &ConfigOverrides,
        env: &impl EnvLookup,
        file: &ConfigFile,
    ) -> Result<Self> {
        // Profile selection happens first: flag > env > literal "default".
        // The file and keyring never name the profile itself.
        let profile = overrides
            .profile
            .clone()
            .or_else(|| env.var(ENV_PROFILE))
            .unwrap_or_else(|| "default".to_string());
        let section = file.profile(&profile).cloned().unwrap_or_default();

        // LANGFUSE_HOST deterministically beats its LANGFUSE_BASEURL alias;
        // last-writer-wins between the two would be ambiguous.
        let host = overrides
            .host
            .clone()
            .or_else(|| env.var(ENV_HOST))
            .or_else(|| env.var(ENV_BASEURL))
            .or_else(|| section.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        if host.trim().is_empty() {
            return Err(Error::Config("host is empty".to_string()));
        }

        let public_key = overrides
            .public_key
            .clone()
            .or_else(|| env.var(ENV_PUBLIC_KEY))
            .or_else(|| section.public_key.clone())
            .ok_or_else(|| {
                Error::Config(format!(
                    "no public key configured for profile '{}'; set LANGFUSE_PUBLIC_KEY, \
                     add it to the config file, or run `lf auth login`",
                    profile
                ))
            })?;

        let secret_key = overrides
            .secret_key
            .clone()
            .or_else(|| env.var(ENV_SECRET_KEY))
            .or_else(|| section.secret_key.clone())
            .map(SecretKey::Inline)
            .unwrap_or_else(|| SecretKey::Deferred(SecretRef::for_profile(&profile)));

        let default_limit = overrides
            .limit
            .or(section.limit)
            .or(file.defaults.limit)
            .unwrap_or(DEFAULT_LIMIT);

        let default_output = overrides
            .output
            .or(section.output)
            .or(file.defaults.output)
            .unwrap_or_default();

        Ok(Self {
            host,
            public_key,
            secret_key,
            profile,
            default_limit,
            default_output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::{MemoryStore, SecretStore};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn file_with_host(host: &str) -> ConfigFile {
        let mut file = ConfigFile::default();
        file.default.host = Some(host.to_string());
        file.default.public_key = Some("pk-file".to_string());
        file
    }

    #[test]
    fn flag_beats_env_beats_file_per_field() {
        let overrides = ConfigOverrides {
            host: Some("https://flag.example".to_string()),
            ..Default::default()
        };
        let env = env(&[
            ("LANGFUSE_HOST", "https://env.example"),
            ("LANGFUSE_PUBLIC_KEY", "pk-env"),
        ]);
        let file = file_with_host("https://file.example");

        let config = EffectiveConfig::resolve_with(&overrides, &env, &file).unwrap();
        // host from flag, public key from env: precedence is per field, not
        // per source as a whole
        assert_eq!(config.host, "https://flag.example");
        assert_eq!(config.public_key, "pk-env");
    }

    #[test]
    fn env_host_beats_file_host() {
        let env = env(&[("LANGFUSE_HOST", "https://env.example")]);
        let file = file_with_host("https://file.example");
        let config =
            EffectiveConfig::resolve_with(&ConfigOverrides::default(), &env, &file).unwrap();
        assert_eq!(config.host, "https://env.example");
    }

    #[test]
    fn host_falls_back_to_hard_default() {
        let env = env(&[("LANGFUSE_PUBLIC_KEY", "pk-env")]);
        let config =
            EffectiveConfig::resolve_with(&ConfigOverrides::default(), &env, &ConfigFile::default())
                .unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
    }

    #[test]
    fn langfuse_host_beats_baseurl_alias() {
        let env = env(&[
            ("LANGFUSE_HOST", "https://host.example"),
            ("LANGFUSE_BASEURL", "https://baseurl.example"),
            ("LANGFUSE_PUBLIC_KEY", "pk"),
        ]);
        let config =
            EffectiveConfig::resolve_with(&ConfigOverrides::default(), &env, &ConfigFile::default())
                .unwrap();
        assert_eq!(config.host, "https://host.example");
    }

    #[test]
    fn baseurl_alias_used_when_host_unset() {
        let env = env(&[
            ("LANGFUSE_BASEURL", "https://baseurl.example"),
            ("LANGFUSE_PUBLIC_KEY", "pk"),
        ]);
        let config =
            EffectiveConfig::resolve_with(&ConfigOverrides::default(), &env, &ConfigFile::default())
                .unwrap();
        assert_eq!(config.host, "https://baseurl.example");
    }

    #[test]
    fn missing_public_key_is_a_config_error() {
        let result = EffectiveConfig::resolve_with(
            &ConfigOverrides::default(),
            &env(&[]),
            &ConfigFile::default(),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn empty_host_is_a_config_error() {
        let overrides = ConfigOverrides {
            host: Some("  ".to_string()),
            public_key: Some("pk".to_string()),
            ..Default::default()
        };
        let result =
            EffectiveConfig::resolve_with(&overrides, &env(&[]), &ConfigFile::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn profile_selected_by_flag_then_env_then_default() {
        let mut file = ConfigFile::default();
        file.profiles.insert(
            "staging".to_string(),
            ProfileSection {
                host: Some("https://staging.example".to_string()),
                public_key: Some("pk-staging".to_string()),
                ..Default::default()
            },
        );

        let overrides = ConfigOverrides {
            profile: Some("staging".to_string()),
            ..Default::default()
        };
        let config = EffectiveConfig::resolve_with(
            &overrides,
            &env(&[("LANGFUSE_PROFILE", "ignored")]),
            &file,
        )
        .unwrap();
        assert_eq!(config.profile, "staging");
        assert_eq!(config.host, "https://staging.example");
        assert_eq!(config.public_key, "pk-staging");

        let config = EffectiveConfig::resolve_with(
            &ConfigOverrides::default(),
            &env(&[("LANGFUSE_PROFILE", "staging")]),
            &file,
        )
        .unwrap();
        assert_eq!(config.profile, "staging");
    }

    #[test]
    fn secret_key_stays_deferred_without_higher_source() {
        let env = env(&[("LANGFUSE_PUBLIC_KEY", "pk")]);
        let config =
            EffectiveConfig::resolve_with(&ConfigOverrides::default(), &env, &ConfigFile::default())
                .unwrap();
        assert!(!config.secret_key.is_inline());

        let store = MemoryStore::with_secret("default:secret_key", "sk-keyring");
        assert_eq!(
            config.secret_key.resolve(&store),
            Some("sk-keyring".to_string())
        );
        // Unavailable store degrades to absence, not an error
        assert_eq!(config.secret_key.resolve(&MemoryStore::new()), None);
    }

    #[test]
    fn env_secret_shadows_the_keyring() {
        let env = env(&[
            ("LANGFUSE_PUBLIC_KEY", "pk"),
            ("LANGFUSE_SECRET_KEY", "sk-env"),
        ]);
        let config =
            EffectiveConfig::resolve_with(&ConfigOverrides::default(), &env, &ConfigFile::default())
                .unwrap();
        assert!(config.secret_key.is_inline());
        let store = MemoryStore::with_secret("default:secret_key", "sk-keyring");
        assert_eq!(config.secret_key.resolve(&store), Some("sk-env".to_string()));
    }

    #[test]
    fn secondary_options_prefer_profile_over_defaults_section() {
        let mut file = ConfigFile::default();
        file.default.public_key = Some("pk".to_string());
        file.default.limit = Some(10);
        file.defaults.limit = Some(25);
        file.defaults.output = Some(OutputFormat::Json);

        let config =
            EffectiveConfig::resolve_with(&ConfigOverrides::default(), &env(&[]), &file).unwrap();
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.default_output, OutputFormat::Json);

        let overrides = ConfigOverrides {
            limit: Some(5),
            ..Default::default()
        };
        let config = EffectiveConfig::resolve_with(&overrides, &env(&[]), &file).unwrap();
        assert_eq!(config.default_limit, 5);
    }

    #[test]
    fn config_file_round_trip_never_writes_secrets() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let mut file = ConfigFile::default();
        file.default.host = Some("https://cloud.langfuse.com".to_string());
        file.default.public_key = Some("pk-1".to_string());
        file.default.secret_key = Some("sk-never-on-disk".to_string());
        file.save_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("sk-never-on-disk"));

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded.default.public_key.as_deref(), Some("pk-1"));
        assert_eq!(loaded.default.secret_key, None);
    }

    #[test]
    fn missing_file_loads_as_empty_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let loaded = ConfigFile::load_from(&temp.path().join("nope.toml")).unwrap();
        assert!(loaded.default.host.is_none());
        assert!(loaded.profiles.is_empty());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "default = not toml [").unwrap();
        assert!(matches!(
            ConfigFile::load_from(&path),
            Err(Error::Config(_))
        ));
    }
}
