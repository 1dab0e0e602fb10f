use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkGenError {
    #[error("no app name found in PR body; add an `APP: <name>` line")]
    MissingAppName,
    #[error("failed to persist artifact: {0}")]
    Persistence(#[from] std::io::Error),
    #[error("failed to encode run summary: {0}")]
    Encode(#[from] serde_json::Error),
}
