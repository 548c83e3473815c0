//! Client builder.

use anyhow::{Context, Result};
use runtime::Runtime;

use crate::{Client, ClientConfig};

/// Builder for constructing a [`Client`].
///
/// The runtime is required; configuration defaults to [`ClientConfig::default`].
#[derive(Default)]
pub struct ClientBuilder {
    runtime: Option<Runtime>,
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the runtime (required).
    pub fn runtime(mut self, runtime: Runtime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// # Errors
    ///
    /// Returns an error if no runtime was provided.
    pub fn build(self) -> Result<Client> {
        let runtime = self
            .runtime
            .context("Runtime is required. Use .runtime() to set it.")?;
        Ok(Client {
            runtime,
            config: self.config,
        })
    }
}
