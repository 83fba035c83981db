use thiserror::Error;

#[derive(Debug, Error)]
pub enum MedfeedError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frontmatter error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Missing frontmatter block")]
    MissingFrontmatter,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Security error: {0}")]
    Security(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, MedfeedError>;
