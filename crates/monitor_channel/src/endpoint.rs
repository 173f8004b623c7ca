use url::Url;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("origin is not a valid url: {message}")]
    InvalidOrigin { message: String },
    #[error("origin has no host")]
    MissingHost,
    #[error("unsupported origin scheme `{scheme}`")]
    UnsupportedScheme { scheme: String },
}

/// Derives the progress-channel endpoint from the hosting page's origin.
///
/// A secure page connects over a secure channel: `https` maps to `wss`,
/// `http` to `ws`. The path is fixed at `/ws`; any path, query, or fragment
/// on the origin is discarded.
pub fn channel_endpoint(origin: &str) -> Result<Url, EndpointError> {
    let parsed = Url::parse(origin).map_err(|err| EndpointError::InvalidOrigin {
        message: err.to_string(),
    })?;

    let scheme = match parsed.scheme() {
        "https" => "wss",
        "http" => "ws",
        other => {
            return Err(EndpointError::UnsupportedScheme {
                scheme: other.to_string(),
            })
        }
    };

    let host = parsed.host_str().ok_or(EndpointError::MissingHost)?;
    let endpoint = match parsed.port() {
        Some(port) => format!("{scheme}://{host}:{port}/ws"),
        None => format!("{scheme}://{host}/ws"),
    };

    Url::parse(&endpoint).map_err(|err| EndpointError::InvalidOrigin {
        message: err.to_string(),
    })
}
