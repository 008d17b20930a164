use thiserror::Error;

/// catdex 統一エラー型
#[derive(Debug, Error)]
pub enum DexError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {message} (status: {status}, url: {url})")]
    Api {
        status: u16,
        url: String,
        message: String,
    },

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Malformed API payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DexError>;

impl DexError {
    /// リトライ可能なエラーかどうか
    pub fn is_retryable(&self) -> bool {
        match self {
            DexError::Network(_) => true,
            DexError::Api { status, .. } => {
                // 429 と 5xx はリトライ可能
                *status == 429 || (*status >= 500 && *status < 600)
            }
            _ => false,
        }
    }
}
