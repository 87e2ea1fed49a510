pub mod deadline;
pub mod lookup;
pub mod race;

pub use crate::domain::model::{Cep, NormalizedAddress};
pub use crate::domain::ports::{ConfigProvider, OutputFormat, SourceAdapter};
pub use crate::utils::error::Result;
