#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The OS rejected the power-state request or the native call could not
    /// be made at all. Every failure collapses into this variant; the public
    /// API further collapses it into a `false` result.
    #[error("Power state request failed: {reason}")]
    PowerStateRequest { reason: String },
}

impl Error {
    pub(crate) fn power_state_request<S: Into<String>>(reason: S) -> Self {
        Error::PowerStateRequest { reason: reason.into() }
    }
}

/// Result type for stay-awake operations
pub type Result<T> = std::result::Result<T, Error>;
