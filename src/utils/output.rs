use crate::domain::model::NormalizedAddress;
use crate::utils::error::Result;

pub const USAGE: &str = "Uso: cep-race <CEP>\nExemplo: cep-race 01153000";

pub fn render_text(address: &NormalizedAddress) -> String {
    [
        format!("API mais rápida: {}", address.source_name),
        format!("CEP: {}", address.postal_code),
        format!("Logradouro: {}", address.street),
        format!("Bairro: {}", address.district),
        format!("Cidade: {}", address.city),
        format!("Estado: {}", address.state),
    ]
    .join("\n")
}

pub fn render_json(address: &NormalizedAddress) -> Result<String> {
    Ok(serde_json::to_string_pretty(address)?)
}
