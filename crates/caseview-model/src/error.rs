use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown dataset profile: {name}")]
    UnknownProfile { name: String },
    #[error("model-name prefix must not be empty")]
    EmptyModelPrefix,
}

pub type Result<T> = std::result::Result<T, ModelError>;
