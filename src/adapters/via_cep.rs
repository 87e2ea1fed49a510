use crate::adapters::http::{endpoint, get_json};
use crate::core::deadline::Deadline;
use crate::domain::model::{Cep, NormalizedAddress};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::SourceError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const SOURCE_NAME: &str = "ViaCEP";
pub const DEFAULT_BASE_URL: &str = "http://viacep.com.br/ws";

/// ViaCEP `/ws/{cep}/json/` response. Only the fields we map are kept;
/// `complemento`, `ibge`, `gia`, `ddd` and `siafi` are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ViaCepPayload {
    cep: Option<String>,
    logradouro: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
    erro: Option<serde_json::Value>,
}

impl ViaCepPayload {
    /// ViaCEP reports unknown CEPs as HTTP 200 with `"erro": true` (older
    /// deployments send the string `"true"`).
    fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

impl From<ViaCepPayload> for NormalizedAddress {
    fn from(payload: ViaCepPayload) -> Self {
        Self {
            postal_code: payload.cep.unwrap_or_default(),
            street: payload.logradouro.unwrap_or_default(),
            district: payload.bairro.unwrap_or_default(),
            city: payload.localidade.unwrap_or_default(),
            state: payload.uf.unwrap_or_default(),
            source_name: SOURCE_NAME.to_string(),
        }
    }
}

/// `GET {base}/{cep}/json/`.
pub struct ViaCepAdapter {
    client: Client,
    base_url: String,
}

impl ViaCepAdapter {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SourceAdapter for ViaCepAdapter {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn lookup(&self, cep: &Cep, deadline: Deadline) -> Result<NormalizedAddress, SourceError> {
        let url = endpoint(&self.base_url, &[cep.as_str(), "json", ""])?;
        let payload: ViaCepPayload = get_json(&self.client, url, deadline).await?;

        if payload.is_not_found() {
            return Err(SourceError::NotFound);
        }

        Ok(payload.into())
    }
}
