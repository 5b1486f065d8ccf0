use crate::config::{Strategy, WindowSpec};
use crate::error::{MonitorError, Result};
use crate::polyfit;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    #[inline]
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Trend::Increasing
        } else if slope < 0.0 {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }

    /// True for anything that is not getting worse (lower loss is better).
    #[inline]
    pub fn is_decreasing_or_stable(self) -> bool {
        matches!(self, Trend::Decreasing | Trend::Stable)
    }
}

/// Classifies a trailing window of loss values.
pub trait TrendEstimator {
    fn classify(&self, window: &[f64]) -> Result<Trend>;

    /// Shortest window `classify` accepts.
    fn min_window(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeEstimator {
    degree: usize,
}

impl SlopeEstimator {
    pub fn new(degree: usize) -> Result<Self> {
        if degree < 1 {
            return Err(MonitorError::InvalidConfig(format!(
                "degree must be at least 1, got {}",
                degree
            )));
        }
        Ok(Self { degree })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl TrendEstimator for SlopeEstimator {
    fn classify(&self, window: &[f64]) -> Result<Trend> {
        let slope = polyfit::slope(window, self.degree)?;
        Ok(Trend::from_slope(slope))
    }

    fn min_window(&self) -> usize {
        self.degree + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceEstimator {
    tolerance: f64,
}

impl ToleranceEstimator {
    pub fn new(tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(MonitorError::InvalidConfig(format!(
                "tolerance must be a finite non-negative number, got {}",
                tolerance
            )));
        }
        Ok(Self { tolerance })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Every consecutive pair differs by at most the tolerance.
    pub fn is_bounded(&self, window: &[f64]) -> bool {
        window
            .windows(2)
            .all(|pair| (pair[1] - pair[0]).abs() <= self.tolerance)
    }
}

impl TrendEstimator for ToleranceEstimator {
    /// A rising slope is always `Increasing`. A non-rising window is `Stable`
    /// only when its steps also stay within the tolerance, otherwise the slope
    /// sign decides.
    fn classify(&self, window: &[f64]) -> Result<Trend> {
        let slope = polyfit::slope(window, 1)?;

        match Trend::from_slope(slope) {
            Trend::Increasing => Ok(Trend::Increasing),
            _ if self.is_bounded(window) => Ok(Trend::Stable),
            trend => Ok(trend),
        }
    }

    fn min_window(&self) -> usize {
        2
    }
}

/// Estimator selected by a [`WindowSpec`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimator {
    Slope(SlopeEstimator),
    Tolerance(ToleranceEstimator),
}

impl Estimator {
    pub fn from_spec(spec: &WindowSpec) -> Result<Self> {
        spec.validate()?;

        match spec.strategy {
            Strategy::Slope { degree } => Ok(Estimator::Slope(SlopeEstimator::new(degree)?)),
            Strategy::Tolerance { tolerance } => {
                Ok(Estimator::Tolerance(ToleranceEstimator::new(tolerance)?))
            }
        }
    }
}

impl TrendEstimator for Estimator {
    #[inline]
    fn classify(&self, window: &[f64]) -> Result<Trend> {
        match self {
            Estimator::Slope(estimator) => estimator.classify(window),
            Estimator::Tolerance(estimator) => estimator.classify(window),
        }
    }

    #[inline]
    fn min_window(&self) -> usize {
        match self {
            Estimator::Slope(estimator) => estimator.min_window(),
            Estimator::Tolerance(estimator) => estimator.min_window(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slope() {
        assert_eq!(Trend::from_slope(0.1), Trend::Increasing);
        assert_eq!(Trend::from_slope(-0.1), Trend::Decreasing);
        assert_eq!(Trend::from_slope(0.0), Trend::Stable);
        assert!(Trend::Stable.is_decreasing_or_stable());
        assert!(Trend::Decreasing.is_decreasing_or_stable());
        assert!(!Trend::Increasing.is_decreasing_or_stable());
    }

    #[test]
    fn test_slope_classification() {
        let estimator = SlopeEstimator::new(1).unwrap();
        assert_eq!(estimator.classify(&[1.0, 0.8, 0.6]), Ok(Trend::Decreasing));
        assert_eq!(estimator.classify(&[0.85, 0.9, 1.1]), Ok(Trend::Increasing));
        assert_eq!(estimator.classify(&[0.5, 0.5, 0.5]), Ok(Trend::Stable));
    }

    #[test]
    fn test_slope_quadratic_linear_term() {
        // y = 10 - 4x + x^2 has linear coefficient -4 even though the tail rises
        let estimator = SlopeEstimator::new(2).unwrap();
        let window: Vec<f64> = (1..=5)
            .map(|x| x as f64)
            .map(|x| 10.0 - 4.0 * x + x * x)
            .collect();
        assert_eq!(estimator.classify(&window), Ok(Trend::Decreasing));
    }

    #[test]
    fn test_slope_insufficient_window() {
        let estimator = SlopeEstimator::new(1).unwrap();
        assert_eq!(
            estimator.classify(&[1.0]),
            Err(MonitorError::InsufficientWindow {
                len: 1,
                required: 2
            })
        );

        let estimator = SlopeEstimator::new(3).unwrap();
        assert_eq!(estimator.min_window(), 4);
        assert!(matches!(
            estimator.classify(&[1.0, 2.0, 3.0]),
            Err(MonitorError::InsufficientWindow { .. })
        ));
    }

    #[test]
    fn test_tolerance_classification() {
        let estimator = ToleranceEstimator::new(0.05).unwrap();

        // Small falling steps are a plateau
        assert_eq!(estimator.classify(&[0.52, 0.51, 0.50]), Ok(Trend::Stable));
        assert_eq!(estimator.classify(&[0.50, 0.52, 0.49]), Ok(Trend::Stable));
        // Falling by more than the bound
        assert_eq!(estimator.classify(&[0.70, 0.60, 0.58]), Ok(Trend::Decreasing));
        assert_eq!(estimator.classify(&[0.50, 0.52, 0.60]), Ok(Trend::Increasing));
    }

    #[test]
    fn test_tolerance_bounded_rise_is_increasing() {
        let estimator = ToleranceEstimator::new(0.05).unwrap();
        assert_eq!(estimator.classify(&[1.0, 1.04, 1.08]), Ok(Trend::Increasing));
        assert!(!estimator
            .classify(&[1.0, 1.04, 1.08])
            .unwrap()
            .is_decreasing_or_stable());
    }

    #[test]
    fn test_zero_tolerance() {
        let estimator = ToleranceEstimator::new(0.0).unwrap();
        assert_eq!(estimator.classify(&[0.3, 0.3]), Ok(Trend::Stable));
        assert_eq!(estimator.classify(&[0.3, 0.31]), Ok(Trend::Increasing));
        assert_eq!(estimator.classify(&[0.31, 0.3]), Ok(Trend::Decreasing));
    }

    #[test]
    fn test_tolerance_insufficient_window() {
        let estimator = ToleranceEstimator::new(0.1).unwrap();
        assert!(matches!(
            estimator.classify(&[0.3]),
            Err(MonitorError::InsufficientWindow { .. })
        ));
    }

    #[test]
    fn test_invalid_estimators() {
        assert!(SlopeEstimator::new(0).is_err());
        assert!(ToleranceEstimator::new(-1.0).is_err());
        assert!(ToleranceEstimator::new(f64::NAN).is_err());
    }

    #[test]
    fn test_estimator_from_spec() {
        let estimator = Estimator::from_spec(&WindowSpec::slope(4, 2)).unwrap();
        assert_eq!(estimator.min_window(), 3);

        let estimator = Estimator::from_spec(&WindowSpec::tolerance(4, 0.1)).unwrap();
        assert_eq!(estimator.min_window(), 2);

        assert!(Estimator::from_spec(&WindowSpec::slope(2, 2)).is_err());
    }
}
