use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendsError {
    #[error("Failed to parse trends snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to parse dashboard config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("Failed to render html: {0}")]
    Render(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, TrendsError>;
