use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MonitorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The window is too short to determine a trend with the configured fit.
    #[error("Insufficient window: {len} values, at least {required} required")]
    InsufficientWindow { len: usize, required: usize },

    #[error("No epochs recorded yet")]
    EmptyHistory,

    #[error("Non-finite loss at epoch {epoch} (train: {train}, val: {val})")]
    NonFiniteLoss { epoch: usize, train: f64, val: f64 },
}

pub type Result<T> = std::result::Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MonitorError::InvalidConfig("lookback must be at least 2".to_string());
        assert!(err.to_string().contains("lookback must be at least 2"));

        let err = MonitorError::InsufficientWindow {
            len: 1,
            required: 2,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient window: 1 values, at least 2 required"
        );

        assert_eq!(MonitorError::EmptyHistory.to_string(), "No epochs recorded yet");

        let err = MonitorError::NonFiniteLoss {
            epoch: 3,
            train: 0.5,
            val: f64::NAN,
        };
        assert!(err.to_string().contains("epoch 3"));
    }
}
