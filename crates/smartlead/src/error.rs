use thiserror::Error;

pub type SmartleadResult<T> = Result<T, SmartleadError>;

/// Failure modes for calls against the Smartlead API. Nothing is retried;
/// callers handle a propagated failure themselves.
#[derive(Error, Debug)]
pub enum SmartleadError {
    /// Upstream accepted the connection and rejected the request.
    /// `message` is the upstream body's `error` field when present.
    #[error("Smartlead returned status {status}")]
    Upstream { status: u16, message: Option<String> },

    /// Upstream unreachable, transport fault, or timeout.
    #[error("Smartlead request failed: {0}")]
    Network(String),

    /// Success status with a body this client could not interpret.
    #[error("Smartlead response could not be decoded: {0}")]
    Decode(String),
}

impl SmartleadError {
    /// Upstream-reported HTTP status, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Upstream's own error message, when the response body carried one.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Self::Upstream { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let rejected = SmartleadError::Upstream {
            status: 402,
            message: Some("upgrade required".to_string()),
        };
        assert_eq!(rejected.status(), Some(402));
        assert_eq!(rejected.upstream_message(), Some("upgrade required"));

        let network = SmartleadError::Network("connection refused".to_string());
        assert_eq!(network.status(), None);
        assert_eq!(network.upstream_message(), None);
    }
}
