use crate::context::ExecutionContext;
use langfuse_core::config::ENV_PROFILE;
use langfuse_core::{ConfigFile, EnvLookup, KeyringStore, ProcessEnv, SecretRef, SecretStore};
use langfuse_types::{Error, Record, Result};
use serde_json::json;

const STATUS_FIELDS: &[(&str, &str)] = &[
    ("Profile", "profile"),
    ("Host", "host"),
    ("Public key", "publicKey"),
    ("Secret key", "secretKey"),
];

/// The profile the auth commands act on. Same selection as the resolver,
/// but without requiring a complete configuration.
fn active_profile(ctx: &ExecutionContext) -> String {
    ctx.overrides()
        .profile
        .clone()
        .or_else(|| ProcessEnv.var(ENV_PROFILE))
        .unwrap_or_else(|| "default".to_string())
}

/// Persist credentials: host and public key go to the config file, the
/// secret key goes to the OS keyring and nowhere else.
pub fn login(
    ctx: &ExecutionContext,
    public_key: Option<String>,
    secret_key: Option<String>,
) -> Result<()> {
    let profile = active_profile(ctx);
    let host = ctx.overrides().host.clone();
    if public_key.is_none() && secret_key.is_none() && host.is_none() {
        return Err(Error::InvalidInput(
            "nothing to store; pass --public-key, --secret-key, or --host".to_string(),
        ));
    }

    let out = ctx.output();

    if public_key.is_some() || host.is_some() {
        let path = ConfigFile::default_path()?;
        let mut file = ConfigFile::load_from(&path)?;
        let section = file.profile_mut(&profile);
        if let Some(value) = host {
            section.host = Some(value);
        }
        if let Some(value) = public_key {
            section.public_key = Some(value);
        }
        file.save_to(&path)?;
        out.status(&format!(
            "Profile '{}' written to {}.",
            profile,
            path.display()
        ));
    }

    if let Some(secret) = secret_key {
        let account = SecretRef::for_profile(&profile).account;
        KeyringStore.set(&account, &secret)?;
        out.status(&format!(
            "Secret key for profile '{}' stored in the system keyring.",
            profile
        ));
    }

    Ok(())
}

pub fn logout(ctx: &ExecutionContext) -> Result<()> {
    let profile = active_profile(ctx);
    let account = SecretRef::for_profile(&profile).account;
    KeyringStore.delete(&account)?;
    ctx.output().status(&format!(
        "Removed the secret key for profile '{}'.",
        profile
    ));
    Ok(())
}

/// Report what the resolver sees. The secret key is described by its source,
/// never by its value.
pub fn status(ctx: &ExecutionContext) -> Result<()> {
    let config = ctx.config()?;

    let secret_state = if config.secret_key.is_inline() {
        "set (flag, environment, or config file)".to_string()
    } else {
        let account = SecretRef::for_profile(&config.profile).account;
        match KeyringStore.get(&account) {
            Some(_) => format!("stored in keyring ({})", account),
            None => "not set".to_string(),
        }
    };

    let mut record = Record::new();
    record.insert("profile".to_string(), json!(config.profile));
    record.insert("host".to_string(), json!(config.host));
    record.insert("publicKey".to_string(), json!(config.public_key));
    record.insert("secretKey".to_string(), json!(secret_state));

    ctx.output().render_detail(&record, STATUS_FIELDS)
}
