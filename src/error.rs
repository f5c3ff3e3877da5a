// Error taxonomy for a cover request.
// The library reports each failure class distinctly so the binary (and
// the tests) can tell a refused connection from a bad status code or a
// failed local write.

use reqwest::StatusCode;
use std::error::Error as StdError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoverError {
    #[error("could not connect to the cover generator")]
    Connect(#[source] reqwest::Error),

    #[error("TLS handshake with the cover generator failed")]
    Tls(#[source] reqwest::Error),

    #[error("request to the cover generator timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("cover generator returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("request to the cover generator failed")]
    Transport(#[source] reqwest::Error),

    #[error("failed to write cover to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CoverError {
    /// Sort a `reqwest` failure into one of the transport classes.
    ///
    /// reqwest has no dedicated TLS predicate; handshake failures surface
    /// as connect errors whose source chain mentions TLS or certificates.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CoverError::Timeout(err)
        } else if is_tls_failure(&err) {
            CoverError::Tls(err)
        } else if err.is_connect() {
            CoverError::Connect(err)
        } else {
            CoverError::Transport(err)
        }
    }
}

fn is_tls_failure(err: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(cause) = source {
        let text = cause.to_string().to_lowercase();
        if ["tls", "ssl", "certificate", "handshake"].iter().any(|w| text.contains(w)) {
            return true;
        }
        source = cause.source();
    }
    false
}
