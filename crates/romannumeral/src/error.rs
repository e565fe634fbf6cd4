use romannumeral_core::ValidationErrorKind;

/// Single failure type for the shell: the four validation kinds plus a
/// catch-all for anything outside the taxonomy. The HTTP layer alone
/// maps these to status codes.
#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error("{0}")]
    Validation(#[from] ValidationErrorKind),
}
