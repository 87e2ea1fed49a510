pub mod adapters;
#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{BrasilApiAdapter, ViaCepAdapter};
pub use crate::core::{
    deadline::Deadline,
    lookup::CepLookup,
    race::{AdapterOutcome, Race, RaceCoordinator},
    Cep, ConfigProvider, NormalizedAddress, OutputFormat, SourceAdapter,
};
pub use crate::utils::error::{CepError, Result, SourceError};
