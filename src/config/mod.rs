use crate::adapters::{brasil_api, via_cep};
use crate::core::ConfigProvider;
use crate::domain::ports::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_MS: u64 = 1000;
pub const MAX_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, Clone, Parser)]
#[command(name = "cep-race")]
#[command(about = "Looks up a Brazilian CEP on BrasilAPI and ViaCEP, keeping the fastest answer")]
#[command(version)]
pub struct CliConfig {
    /// CEP to look up, e.g. 01153000
    pub cep: Option<String>,

    /// Anything after the CEP is accepted and ignored.
    #[arg(hide = true)]
    pub extra_args: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS, help = "Deadline shared by all providers, in milliseconds")]
    pub timeout_ms: u64,

    #[arg(long, default_value = brasil_api::DEFAULT_BASE_URL)]
    pub brasil_api_url: String,

    #[arg(long, default_value = via_cep::DEFAULT_BASE_URL)]
    pub via_cep_url: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn for_cep(cep: impl Into<String>) -> Self {
        Self {
            cep: Some(cep.into()),
            extra_args: Vec::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            brasil_api_url: brasil_api::DEFAULT_BASE_URL.to_string(),
            via_cep_url: via_cep::DEFAULT_BASE_URL.to_string(),
            format: OutputFormat::Text,
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn cep(&self) -> Option<&str> {
        self.cep.as_deref()
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn brasil_api_url(&self) -> &str {
        &self.brasil_api_url
    }

    fn via_cep_url(&self) -> &str {
        &self.via_cep_url
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_range("timeout_ms", self.timeout_ms, 1, MAX_TIMEOUT_MS)?;
        validate_url("brasil_api_url", &self.brasil_api_url)?;
        validate_url("via_cep_url", &self.via_cep_url)?;
        Ok(())
    }
}
