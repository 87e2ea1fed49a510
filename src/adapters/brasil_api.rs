use crate::adapters::http::{endpoint, get_json};
use crate::core::deadline::Deadline;
use crate::domain::model::{Cep, NormalizedAddress};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::SourceError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const SOURCE_NAME: &str = "BrasilAPI";
pub const DEFAULT_BASE_URL: &str = "https://brasilapi.com.br/api/cep/v1";

/// BrasilAPI `cep/v1` response. English field names; `service` is the
/// upstream BrasilAPI itself used.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BrasilApiPayload {
    cep: Option<String>,
    state: Option<String>,
    city: Option<String>,
    district: Option<String>,
    street: Option<String>,
    service: Option<String>,
}

impl From<BrasilApiPayload> for NormalizedAddress {
    fn from(payload: BrasilApiPayload) -> Self {
        Self {
            postal_code: payload.cep.unwrap_or_default(),
            street: payload.street.unwrap_or_default(),
            district: payload.district.unwrap_or_default(),
            city: payload.city.unwrap_or_default(),
            state: payload.state.unwrap_or_default(),
            source_name: SOURCE_NAME.to_string(),
        }
    }
}

/// `GET {base}/{cep}`.
pub struct BrasilApiAdapter {
    client: Client,
    base_url: String,
}

impl BrasilApiAdapter {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SourceAdapter for BrasilApiAdapter {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn lookup(&self, cep: &Cep, deadline: Deadline) -> Result<NormalizedAddress, SourceError> {
        let url = endpoint(&self.base_url, &[cep.as_str()])?;
        let payload: BrasilApiPayload = get_json(&self.client, url, deadline).await?;

        tracing::debug!(
            upstream = payload.service.as_deref().unwrap_or(""),
            "BrasilAPI answered"
        );

        Ok(payload.into())
    }
}
