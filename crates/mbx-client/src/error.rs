use thiserror::Error;

use mbx_auth::AuthError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Server returned 401. Session state has already been torn down and
    /// the re-login path entered by the time this surfaces.
    #[error("unauthorized — session cleared, sign in again")]
    Unauthorized,

    /// Server returned 403: the credential is valid but the role is
    /// insufficient. Not a session-invalidating condition.
    #[error("access denied: {0}")]
    Forbidden(String),

    /// Any other non-2xx response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body did not match the expected envelope.
    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),
}
