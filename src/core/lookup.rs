use crate::adapters::{default_adapters, http::build_client};
use crate::core::race::RaceCoordinator;
use crate::core::{Cep, ConfigProvider, NormalizedAddress};
use crate::utils::error::{CepError, Result};

/// Resolves the configured CEP by racing the default providers.
pub struct CepLookup<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> CepLookup<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<NormalizedAddress> {
        // Checked before any client is built, so a missing CEP makes no request.
        let cep = self.config.cep().map(Cep::from).ok_or(CepError::MissingCep)?;

        let client = build_client()?;
        let coordinator =
            RaceCoordinator::new(default_adapters(&self.config, client), self.config.timeout());

        tracing::info!(
            cep = %cep,
            providers = coordinator.adapter_count(),
            timeout_ms = coordinator.timeout().as_millis() as u64,
            "Starting CEP lookup"
        );

        let address = coordinator.race(&cep).await?;

        tracing::info!(
            cep = %cep,
            source = %address.source_name,
            city = %address.city,
            state = %address.state,
            "CEP lookup completed"
        );

        Ok(address)
    }
}
