use thiserror::Error;

/// Failure taxonomy for one refresh cycle.
///
/// Every variant is recovered at the orchestrator boundary and folded into
/// the status of the published state; nothing here reaches the host as a
/// panic.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The overview page carried no link to a schedule document.
    #[error("No schedule document link found on {page}")]
    LinkNotFound { page: String },

    /// Network-level failure at either fetch.
    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// The document bytes could not be decoded into text.
    #[error("Failed to decode schedule document: {0}")]
    Decode(String),

    /// The document decoded but yielded zero valid entries.
    #[error("No schedule entries found in document text")]
    NoEvents,

    /// Valid entries exist but none are upcoming.
    #[error("All schedule entries are in the past")]
    NoFutureEvent,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for pipeline operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;

impl ScheduleError {
    /// True when the failure means "no document available this cycle".
    pub fn is_download_failure(&self) -> bool {
        matches!(
            self,
            Self::LinkNotFound { .. }
                | Self::Network(_)
                | Self::Connect(_)
                | Self::Timeout
                | Self::Http { .. }
                | Self::Decode(_)
        )
    }
}

impl From<reqwest::Error> for ScheduleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScheduleError::Timeout
        } else if err.is_connect() {
            ScheduleError::Connect(err.to_string())
        } else if let Some(status) = err.status() {
            ScheduleError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ScheduleError::Network(err.to_string())
        }
    }
}

impl From<lopdf::Error> for ScheduleError {
    fn from(err: lopdf::Error) -> Self {
        ScheduleError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScheduleError::LinkNotFound {
            page: "https://example.test".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No schedule document link found on https://example.test"
        );

        let err = ScheduleError::Http {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 503: Service Unavailable");
    }

    #[test]
    fn test_download_failure_classification() {
        assert!(
            ScheduleError::LinkNotFound {
                page: String::new()
            }
            .is_download_failure()
        );
        assert!(ScheduleError::Timeout.is_download_failure());
        assert!(ScheduleError::Decode("bad xref".to_string()).is_download_failure());
        assert!(!ScheduleError::NoEvents.is_download_failure());
        assert!(!ScheduleError::NoFutureEvent.is_download_failure());
    }
}
