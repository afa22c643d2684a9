/// Convenience result type used across Certigen.
pub type CertigenResult<T> = Result<T, CertigenError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum CertigenError {
    /// Invalid roster data: unreadable CSV, missing columns, blank required
    /// fields, duplicate recipient addresses.
    #[error("roster error: {0}")]
    Roster(String),

    /// Font file failures: unreadable path or unparseable font data. Fatal for
    /// the whole batch since every row shares one font set.
    #[error("font error: {0}")]
    Font(String),

    /// Per-row compositing failures: template decode, QR encode, artifact
    /// write.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CertigenError {
    /// Build a [`CertigenError::Roster`] value.
    pub fn roster(msg: impl Into<String>) -> Self {
        Self::Roster(msg.into())
    }

    /// Build a [`CertigenError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`CertigenError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
