use langfuse_types::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

/// Service name identifying this tool in the system secret store.
pub const KEYRING_SERVICE: &str = "langfuse-cli";

/// Uniform get/set/delete over a platform secret-storage facility.
///
/// `get` degrades to `None` when the store is unavailable or has no entry;
/// resolution treats that as "not found", never as an error. `set` and
/// `delete` are only reached from explicit `auth` commands, where a failure
/// is reported.
pub trait SecretStore {
    fn get(&self, account: &str) -> Option<String>;
    fn set(&self, account: &str, value: &str) -> Result<()>;
    fn delete(&self, account: &str) -> Result<()>;
}

/// The OS keyring (Keychain, Credential Manager, keyutils).
pub struct KeyringStore;

impl SecretStore for KeyringStore {
    fn get(&self, account: &str) -> Option<String> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, account).ok()?;
        entry.get_password().ok()
    }

    fn set(&self, account: &str, value: &str) -> Result<()> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, account)
            .map_err(|e| Error::Secret(e.to_string()))?;
        entry
            .set_password(value)
            .map_err(|e| Error::Secret(e.to_string()))
    }

    fn delete(&self, account: &str) -> Result<()> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, account)
            .map_err(|e| Error::Secret(e.to_string()))?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => {
                Err(Error::Secret(format!("no secret stored for {}", account)))
            }
            Err(e) => Err(Error::Secret(e.to_string())),
        }
    }
}

/// In-memory store for tests and headless environments.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(account: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .expect("store lock")
            .insert(account.to_string(), value.to_string());
        store
    }
}

impl SecretStore for MemoryStore {
    fn get(&self, account: &str) -> Option<String> {
        self.entries.lock().ok()?.get(account).cloned()
    }

    fn set(&self, account: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| Error::Secret("store poisoned".into()))?
            .insert(account.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, account: &str) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| Error::Secret("store poisoned".into()))?
            .remove(account)
            .map(|_| ())
            .ok_or_else(|| Error::Secret(format!("no secret stored for {}", account)))
    }
}

/// Opaque handle to one keyring slot, resolved only when a command actually
/// needs credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRef {
    pub account: String,
}

impl SecretRef {
    pub fn for_profile(profile: &str) -> Self {
        Self {
            account: format!("{}:secret_key", profile),
        }
    }
}

/// The secret-key slot of a resolved configuration.
///
/// Flags, env, and the config file yield an inline value; otherwise the slot
/// stays a deferred keyring reference so the store is never read
/// speculatively.
#[derive(Clone)]
pub enum SecretKey {
    Inline(String),
    Deferred(SecretRef),
}

impl SecretKey {
    pub fn resolve(&self, store: &dyn SecretStore) -> Option<String> {
        match self {
            SecretKey::Inline(value) => Some(value.clone()),
            SecretKey::Deferred(secret_ref) => store.get(&secret_ref.account),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, SecretKey::Inline(_))
    }
}

// Redacted so the secret can never reach logs through a Debug format.
impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretKey::Inline(_) => write!(f, "SecretKey::Inline(***)"),
            SecretKey::Deferred(secret_ref) => {
                write!(f, "SecretKey::Deferred({:?})", secret_ref.account)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("default:secret_key"), None);
        store.set("default:secret_key", "sk-1").unwrap();
        assert_eq!(store.get("default:secret_key"), Some("sk-1".to_string()));
        store.delete("default:secret_key").unwrap();
        assert!(store.delete("default:secret_key").is_err());
    }

    #[test]
    fn secret_ref_encodes_profile_and_kind() {
        assert_eq!(
            SecretRef::for_profile("staging").account,
            "staging:secret_key"
        );
    }

    #[test]
    fn deferred_secret_reads_store_inline_does_not() {
        let store = MemoryStore::with_secret("default:secret_key", "sk-2");
        let deferred = SecretKey::Deferred(SecretRef::for_profile("default"));
        assert_eq!(deferred.resolve(&store), Some("sk-2".to_string()));

        let inline = SecretKey::Inline("sk-flag".to_string());
        assert_eq!(inline.resolve(&store), Some("sk-flag".to_string()));
    }

    #[test]
    fn debug_never_prints_the_secret() {
        let key = SecretKey::Inline("sk-very-secret".to_string());
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains("sk-very-secret"));
    }
}
