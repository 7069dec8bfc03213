use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    /// The document has no element matching the container selector
    #[error("no content container matching `{selector}` found")]
    ContainerNotFound { selector: String },

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

pub type Result<T> = std::result::Result<T, DeckError>;
