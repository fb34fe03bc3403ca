use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("invalid condition on field `{field}`: {message}")]
    Condition { field: String, message: String },
    #[error("invalid pattern on field `{field}`: `{pattern}`")]
    Pattern { field: String, pattern: String },
}

pub type Result<T> = std::result::Result<T, FormError>;
