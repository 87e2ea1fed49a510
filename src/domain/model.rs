use serde::{Deserialize, Serialize};
use std::fmt;

/// Brazilian postal code. Passed through to providers as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cep(String);

impl Cep {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Cep {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Cep {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Provider-independent address. Fields a provider leaves out are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAddress {
    pub postal_code: String,
    pub street: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub source_name: String,
}
