use crate::error::{MonitorError, Result};

/// Smallest trailing window that can carry a trend.
pub const MIN_LOOKBACK: usize = 2;

/// How a window of losses is turned into a [`Trend`](crate::Trend).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Sign of the linear coefficient of a least-squares polynomial fit.
    Slope { degree: usize },
    /// Bounded step-to-step variation, falling back to the linear slope sign.
    Tolerance { tolerance: f64 },
}

impl Strategy {
    /// Degree of the polynomial the strategy fits.
    pub fn degree(&self) -> usize {
        match self {
            Strategy::Slope { degree } => *degree,
            Strategy::Tolerance { .. } => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec {
    pub lookback: usize,
    pub strategy: Strategy,
}

impl WindowSpec {
    pub fn slope(lookback: usize, degree: usize) -> Self {
        Self {
            lookback,
            strategy: Strategy::Slope { degree },
        }
    }

    pub fn tolerance(lookback: usize, tolerance: f64) -> Self {
        Self {
            lookback,
            strategy: Strategy::Tolerance { tolerance },
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_lookback(self.lookback)?;

        match self.strategy {
            Strategy::Slope { degree } => {
                if degree < 1 {
                    return Err(MonitorError::InvalidConfig(format!(
                        "degree must be at least 1, got {}",
                        degree
                    )));
                }
            }
            Strategy::Tolerance { tolerance } => {
                if !tolerance.is_finite() || tolerance < 0.0 {
                    return Err(MonitorError::InvalidConfig(format!(
                        "tolerance must be a finite non-negative number, got {}",
                        tolerance
                    )));
                }
            }
        }

        let degree = self.strategy.degree();
        if self.lookback <= degree {
            return Err(MonitorError::InvalidConfig(format!(
                "lookback ({}) must exceed the fit degree ({})",
                self.lookback, degree
            )));
        }

        Ok(())
    }
}

pub(crate) fn validate_lookback(lookback: usize) -> Result<()> {
    if lookback < MIN_LOOKBACK {
        return Err(MonitorError::InvalidConfig(format!(
            "lookback must be at least {}, got {}",
            MIN_LOOKBACK, lookback
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_specs() {
        assert!(WindowSpec::slope(2, 1).validate().is_ok());
        assert!(WindowSpec::slope(5, 3).validate().is_ok());
        assert!(WindowSpec::tolerance(2, 0.0).validate().is_ok());
        assert!(WindowSpec::tolerance(10, 0.05).validate().is_ok());
    }

    #[test]
    fn test_invalid_specs() {
        let invalid = [
            WindowSpec::slope(1, 1),
            WindowSpec::slope(0, 1),
            WindowSpec::slope(4, 0),
            WindowSpec::slope(3, 3), // lookback must exceed degree
            WindowSpec::tolerance(1, 0.1),
            WindowSpec::tolerance(4, -0.1),
            WindowSpec::tolerance(4, f64::NAN),
            WindowSpec::tolerance(4, f64::INFINITY),
        ];

        for spec in invalid {
            assert!(
                matches!(spec.validate(), Err(MonitorError::InvalidConfig(_))),
                "Expected InvalidConfig for {:?}",
                spec
            );
        }
    }
}
