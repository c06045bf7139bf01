use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("connection failure: {0}")]
    Connect(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http {
        status: reqwest::StatusCode,
        retriable: bool,
    },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Whether a caller could reasonably try the same request again. The
    /// pipeline itself never retries.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::InvalidUrl(_) => false,
            Self::BodyTooLarge(_) => false,
            Self::UnsupportedContentType(_) => false,
            Self::Decode(_) => false,
            Self::Http { retriable, .. } => *retriable,

            Self::Connect(_) => true,
            Self::ConnectTimeout => true,
            Self::RequestTimeout => true,
            Self::RedirectLoop => true,
            Self::Io(_) => true,
            Self::Unknown(_) => true,
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http {
                status,
                retriable: status.is_server_error(),
            }
        } else if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retry_classification() {
        assert!(!FetchError::InvalidUrl(url::ParseError::EmptyHost).should_retry());
        assert!(!FetchError::BodyTooLarge(1000).should_retry());
        assert!(!FetchError::Decode("expected array".to_string()).should_retry());
        assert!(!FetchError::UnsupportedContentType("text/html".to_string()).should_retry());

        assert!(FetchError::Connect("refused".to_string()).should_retry());
        assert!(FetchError::ConnectTimeout.should_retry());
        assert!(FetchError::RequestTimeout.should_retry());

        assert!(
            !FetchError::Http {
                status: reqwest::StatusCode::NOT_FOUND,
                retriable: false
            }
            .should_retry()
        );
        assert!(
            FetchError::Http {
                status: reqwest::StatusCode::BAD_GATEWAY,
                retriable: true
            }
            .should_retry()
        );
    }
}
