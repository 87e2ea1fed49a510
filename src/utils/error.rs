use thiserror::Error;

#[derive(Error, Debug)]
pub enum CepError {
    #[error("No CEP given")]
    MissingCep,

    #[error("No provider responded within {timeout_ms}ms")]
    Timeout { timeout_ms: u128 },

    #[error("HTTP client error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Configuration,
    Network,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CepError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CepError::MissingCep => ErrorCategory::Usage,
            CepError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CepError::Timeout { .. } | CepError::ApiError(_) => ErrorCategory::Network,
            CepError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CepError::MissingCep | CepError::InvalidConfigValueError { .. } => ErrorSeverity::Medium,
            CepError::Timeout { .. } => ErrorSeverity::High,
            CepError::ApiError(_) | CepError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CepError::MissingCep => "Nenhum CEP informado".to_string(),
            CepError::Timeout { timeout_ms } => format!(
                "Erro: Timeout - nenhuma API respondeu em menos de {}",
                human_duration(*timeout_ms)
            ),
            CepError::ApiError(e) => format!("Falha ao preparar o cliente HTTP: {}", e),
            CepError::SerializationError(e) => format!("Falha ao serializar o resultado: {}", e),
            CepError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuração inválida em '{}': {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CepError::MissingCep => "Informe o CEP como argumento, ex.: cep-race 01153000",
            CepError::Timeout { .. } => {
                "Verifique a conexão ou aumente o prazo com --timeout-ms"
            }
            CepError::ApiError(_) => "Verifique a instalação de certificados TLS do sistema",
            CepError::SerializationError(_) => "Tente novamente com --format text",
            CepError::InvalidConfigValueError { .. } => "Revise os argumentos da linha de comando",
        }
    }

    /// Process exit status for this error. Every failure maps to 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

fn human_duration(millis: u128) -> String {
    if millis % 1000 == 0 {
        let secs = millis / 1000;
        if secs == 1 {
            "1 segundo".to_string()
        } else {
            format!("{} segundos", secs)
        }
    } else {
        format!("{}ms", millis)
    }
}

/// Failure of a single provider lookup. Swallowed by the race coordinator and
/// only ever logged.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("provider base URL cannot carry path segments: {0}")]
    UnsupportedBaseUrl(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("CEP not found by provider")]
    NotFound,

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

pub type Result<T> = std::result::Result<T, CepError>;
