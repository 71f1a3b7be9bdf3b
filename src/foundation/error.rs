pub type CardResult<T> = Result<T, CardError>;

#[derive(thiserror::Error, Debug)]
pub enum CardError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to load artwork: {0}")]
    ArtworkLoad(#[source] anyhow::Error),

    #[error("render error: {0}")]
    Render(String),
}

impl CardError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn artwork(cause: impl Into<anyhow::Error>) -> Self {
        Self::ArtworkLoad(cause.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Return `true` for errors caused by the request itself rather than by I/O or rendering.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
