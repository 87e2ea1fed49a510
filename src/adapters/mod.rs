// Adapters layer: one module per CEP provider plus the shared HTTP helpers.

pub mod brasil_api;
pub mod http;
pub mod via_cep;

use crate::domain::ports::{ConfigProvider, SourceAdapter};
use reqwest::Client;
use std::sync::Arc;

pub use brasil_api::BrasilApiAdapter;
pub use via_cep::ViaCepAdapter;

/// The two providers raced on every lookup, BrasilAPI first.
pub fn default_adapters<C: ConfigProvider>(config: &C, client: Client) -> Vec<Arc<dyn SourceAdapter>> {
    vec![
        Arc::new(BrasilApiAdapter::new(client.clone(), config.brasil_api_url())),
        Arc::new(ViaCepAdapter::new(client, config.via_cep_url())),
    ]
}
