mod config;
mod error;
mod history;
mod monitor;
pub mod polyfit;
mod trend;


pub use config::{Strategy, WindowSpec, MIN_LOOKBACK};
pub use error::{MonitorError, Result};
pub use history::{LossHistory, SnapshotLog};
pub use monitor::TrendMonitor;
pub use trend::{Estimator, SlopeEstimator, ToleranceEstimator, Trend, TrendEstimator};
