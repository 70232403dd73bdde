//! REST-specific error types.

/// Failures of a single REST call: transport, decoding or an unexpected
/// status. Each variant carries the requested url for diagnosis.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The request could not be sent or its body could not be read
    #[error("Error fetching data from roundup rest api\nurl: {url}\n{source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not JSON
    #[error("Error parsing json from roundup rest api\nurl: {url}\n{source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response is JSON but not shaped like the expected envelope
    #[error("Unexpected response shape\nurl: {url}\n{source}")]
    Envelope {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The server answered with a non-success status
    #[error("Unexpected response\nurl: {url}\nresponse status: {status}\nresponse body: {body}")]
    UnexpectedResponse {
        url: String,
        status: u16,
        body: String,
    },
}

impl NetworkError {
    /// Return the url of the failed request.
    ///
    pub fn url(&self) -> &str {
        match self {
            NetworkError::Request { url, .. }
            | NetworkError::Decode { url, .. }
            | NetworkError::Envelope { url, .. }
            | NetworkError::UnexpectedResponse { url, .. } => url,
        }
    }
}
