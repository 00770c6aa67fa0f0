use thiserror::Error;

/// Draft validation failures, raised before anything reaches the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{0} required")]
    Required(String),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
