use thiserror::Error;

#[derive(Error, Debug)]
pub enum DodgerError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Could not place {quantity} location(s) within {attempts} attempts")]
    Infeasible { quantity: usize, attempts: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DodgerError {
    /// True for errors caused by the configuration bundle (including impossible placement)
    pub fn is_configuration(&self) -> bool {
        matches!(self, DodgerError::Config(_) | DodgerError::Infeasible { .. })
    }
}

pub type Result<T> = std::result::Result<T, DodgerError>;
