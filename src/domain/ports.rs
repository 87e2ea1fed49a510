use crate::core::deadline::Deadline;
use crate::domain::model::{Cep, NormalizedAddress};
use crate::utils::error::SourceError;
use async_trait::async_trait;
use std::time::Duration;

/// One remote CEP provider.
///
/// `lookup` performs a single request bound to `deadline` and either returns a
/// normalized address or a [`SourceError`]. Implementations never retry.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn name(&self) -> &str;

    async fn lookup(&self, cep: &Cep, deadline: Deadline)
        -> Result<NormalizedAddress, SourceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub trait ConfigProvider: Send + Sync {
    fn cep(&self) -> Option<&str>;
    fn timeout(&self) -> Duration;
    fn brasil_api_url(&self) -> &str;
    fn via_cep_url(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
}
