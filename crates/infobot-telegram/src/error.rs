use thiserror::Error;

#[derive(Debug, Error)]
/// Enumerates failures surfaced by the Telegram Bot API client.
pub enum TelegramApiError {
    #[error("missing bot token")]
    MissingToken,
    #[error("telegram access forbidden: {description}")]
    Forbidden { description: String },
    #[error("telegram bad request: {description}")]
    BadRequest { description: String },
    #[error("telegram rate limited (retry after {retry_after_seconds:?}s): {description}")]
    RateLimited {
        retry_after_seconds: Option<u64>,
        description: String,
    },
    #[error("telegram api error {error_code}: {description}")]
    Api { error_code: u16, description: String },
    #[error("telegram returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl TelegramApiError {
    /// Maps a `{ok:false}` envelope onto the matching variant.
    pub fn from_envelope(
        error_code: u16,
        description: Option<String>,
        retry_after_seconds: Option<u64>,
    ) -> Self {
        let description = description.unwrap_or_else(|| "unknown error".to_string());
        match error_code {
            400 => Self::BadRequest { description },
            403 => Self::Forbidden { description },
            429 => Self::RateLimited {
                retry_after_seconds,
                description,
            },
            _ => Self::Api {
                error_code,
                description,
            },
        }
    }

    /// True for failures that mean "not allowed / not applicable here" and
    /// should degrade an optional field rather than abort a request.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::Forbidden { .. } | Self::BadRequest { .. })
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Api { error_code, .. } => *error_code >= 500,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            Self::Http(error) => {
                error.is_timeout() || error.is_connect() || error.is_request() || error.is_body()
            }
            _ => false,
        }
    }

    pub fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            Self::RateLimited {
                retry_after_seconds,
                ..
            } => *retry_after_seconds,
            _ => None,
        }
    }

    /// Stable variant name used as the failure kind in operator reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken => "MissingToken",
            Self::Forbidden { .. } => "TelegramForbiddenError",
            Self::BadRequest { .. } => "TelegramBadRequest",
            Self::RateLimited { .. } => "TelegramRetryAfter",
            Self::Api { .. } => "TelegramApiError",
            Self::HttpStatus { .. } => "TelegramHttpStatus",
            Self::Http(_) => "TelegramNetworkError",
            Self::Serde(_) => "SerializationError",
            Self::InvalidResponse(_) => "InvalidResponse",
        }
    }
}
