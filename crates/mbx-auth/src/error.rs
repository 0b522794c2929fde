use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("silent token acquisition failed: {0}")]
    InteractionRequired(String),

    #[error("{0}")]
    LoginFailed(String),

    #[error("browser login failed: {0}")]
    BrowserFlowFailed(String),

    #[error("credential store error: {0}")]
    StoreError(String),

    #[error("login request failed: {0}")]
    Http(String),
}
