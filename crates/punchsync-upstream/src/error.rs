use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure — connect error, timeout, TLS.
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-2xx status.
    #[error("upstream returned HTTP {code}")]
    Status { code: u16 },

    /// The response body was not decodable as JSON in any accepted shape.
    #[error("upstream response not decodable: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;
