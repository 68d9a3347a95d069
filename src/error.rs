use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input not found: {path}")]
    InputNotFound { path: String },

    #[error("refusing to overwrite existing file: {path}")]
    OutputExists { path: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CvError>;
