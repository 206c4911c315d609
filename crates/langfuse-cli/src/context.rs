use langfuse_client::Client;
use langfuse_core::{
    ConfigOverrides, EffectiveConfig, KeyringStore, OutputContext, ProcessEnv, RenderOptions,
    TermProbe,
};
use langfuse_types::Result;
use once_cell::sync::OnceCell;

/// Per-invocation state shared by every handler.
///
/// Configuration resolves on first use and the HTTP client is built only by
/// commands that talk to the platform, so offline commands (`auth`, usage
/// errors) never touch the network or the keyring.
pub struct ExecutionContext {
    overrides: ConfigOverrides,
    options: RenderOptions,
    config: OnceCell<EffectiveConfig>,
    output: OnceCell<OutputContext>,
}

impl ExecutionContext {
    pub fn new(overrides: ConfigOverrides, options: RenderOptions) -> Self {
        Self {
            overrides,
            options,
            config: OnceCell::new(),
            output: OnceCell::new(),
        }
    }

    pub fn overrides(&self) -> &ConfigOverrides {
        &self.overrides
    }

    pub fn config(&self) -> Result<&EffectiveConfig> {
        self.config
            .get_or_try_init(|| EffectiveConfig::resolve(&self.overrides, &ProcessEnv))
    }

    /// The one mode decision for this run. A failed config resolution falls
    /// back to the default format so error paths can still print.
    pub fn output(&self) -> &OutputContext {
        self.output.get_or_init(|| {
            let default_format = self
                .config()
                .map(|config| config.default_output)
                .unwrap_or_default();
            OutputContext::new(self.options.clone(), default_format, TermProbe::detect())
        })
    }

    /// Construct the REST client; this is the point where a deferred secret
    /// key is read from the keyring.
    pub fn client(&self) -> Result<Client> {
        Client::new(self.config()?, &KeyringStore)
    }

    /// Effective limit for a list command: flag, else resolved default.
    pub fn limit(&self, flag: Option<usize>) -> Result<usize> {
        match flag {
            Some(n) => Ok(n),
            None => Ok(self.config()?.default_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_resolution_is_lazy() {
        let overrides = ConfigOverrides {
            host: Some("https://example.test".to_string()),
            ..Default::default()
        };
        let ctx = ExecutionContext::new(overrides, RenderOptions::default());
        assert!(ctx.config.get().is_none());
    }

    #[test]
    fn limit_prefers_the_flag() {
        let overrides = ConfigOverrides {
            public_key: Some("pk".to_string()),
            ..Default::default()
        };
        let ctx = ExecutionContext::new(overrides, RenderOptions::default());
        assert_eq!(ctx.limit(Some(7)).unwrap(), 7);
    }
}
