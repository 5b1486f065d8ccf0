use crate::config::{validate_lookback, WindowSpec};
use crate::error::{MonitorError, Result};
use crate::history::{LossHistory, SnapshotLog};
use crate::trend::{Estimator, Trend, TrendEstimator};

// The first recorded epoch is never picked as best, its loss is unwarmed
const BEST_SEARCH_START: usize = 1;

/// Watches training and validation loss and signals when the model starts to
/// overfit, keeping hold of the snapshot taken at the best validation loss.
///
/// `S` is an opaque snapshot handle (a checkpoint path, an id into an
/// external store, a shared pointer). The monitor only clones and returns it.
#[derive(Debug, Clone)]
pub struct TrendMonitor<S, E = Estimator> {
    lookback: usize,
    estimator: E,
    train_losses: LossHistory,
    val_losses: LossHistory,
    snapshots: SnapshotLog<S>,
    best_snapshot: Option<S>,
    best_epoch: Option<usize>,
    stopped: bool,
}

impl<S: Clone> TrendMonitor<S, Estimator> {
    pub fn new(spec: WindowSpec) -> Result<Self> {
        let estimator = Estimator::from_spec(&spec)?;
        Self::with_estimator(spec.lookback, estimator)
    }

    pub fn with_slope(lookback: usize, degree: usize) -> Result<Self> {
        Self::new(WindowSpec::slope(lookback, degree))
    }

    pub fn with_tolerance(lookback: usize, tolerance: f64) -> Result<Self> {
        Self::new(WindowSpec::tolerance(lookback, tolerance))
    }
}

impl<S: Clone, E: TrendEstimator> TrendMonitor<S, E> {
    pub fn with_estimator(lookback: usize, estimator: E) -> Result<Self> {
        validate_lookback(lookback)?;

        if lookback < estimator.min_window() {
            return Err(MonitorError::InvalidConfig(format!(
                "lookback ({}) is shorter than the estimator's minimum window ({})",
                lookback,
                estimator.min_window()
            )));
        }

        Ok(Self {
            lookback,
            estimator,
            train_losses: LossHistory::new(),
            val_losses: LossHistory::new(),
            snapshots: SnapshotLog::new(),
            best_snapshot: None,
            best_epoch: None,
            stopped: false,
        })
    }

    /// Records one epoch and returns `true` if the model has started to overfit:
    /// training loss is falling or flat while validation loss is rising.
    pub fn record(&mut self, train_loss: f64, val_loss: f64, snapshot: S) -> Result<bool> {
        let epoch = self.epochs();
        if !train_loss.is_finite() || !val_loss.is_finite() {
            return Err(MonitorError::NonFiniteLoss {
                epoch,
                train: train_loss,
                val: val_loss,
            });
        }

        self.train_losses.push(train_loss);
        self.val_losses.push(val_loss);

        if self.epochs() < self.estimator.min_window() {
            log::debug!(
                "Epoch {}: collecting history ({}/{})",
                epoch,
                self.epochs(),
                self.estimator.min_window()
            );
            // Epoch 0 is never a best candidate
            self.snapshots.push(if epoch == 0 { None } else { Some(snapshot) });
            return Ok(false);
        }

        let (train_trend, val_trend) = match self.classify_windows() {
            Ok(trends) => trends,
            Err(e) => {
                self.train_losses.pop();
                self.val_losses.pop();
                return Err(e);
            }
        };

        log::debug!(
            "Epoch {}: train {:.5} ({:?}), val {:.5} ({:?})",
            epoch,
            train_loss,
            train_trend,
            val_loss,
            val_trend
        );

        if train_trend.is_decreasing_or_stable() && val_trend == Trend::Increasing {
            let best_epoch = self
                .val_losses
                .argmin_from(BEST_SEARCH_START)
                .unwrap_or(epoch);

            // An earlier best is already in the log
            if best_epoch == epoch {
                self.snapshots.push(Some(snapshot.clone()));
                self.best_snapshot = Some(snapshot);
            } else {
                self.snapshots.push(None);
                self.best_snapshot = self.snapshots.get(best_epoch).cloned();
            }
            self.best_epoch = Some(best_epoch);
            self.stopped = true;

            log::info!(
                "Overfitting detected at epoch {}, best epoch {} (val loss {:.5})",
                epoch,
                best_epoch,
                self.val_losses.as_slice()[best_epoch]
            );
            return Ok(true);
        }

        self.snapshots.push(Some(snapshot));
        Ok(false)
    }

    fn classify_windows(&self) -> Result<(Trend, Trend)> {
        let train_trend = self
            .estimator
            .classify(self.train_losses.window(self.lookback))?;
        let val_trend = self
            .estimator
            .classify(self.val_losses.window(self.lookback))?;
        Ok((train_trend, val_trend))
    }

    /// Snapshot kept at the last overfitting verdict, `None` until then.
    pub fn best_snapshot(&self) -> Result<Option<&S>> {
        self.ensure_recorded()?;
        Ok(self.best_snapshot.as_ref())
    }

    /// Epoch whose snapshot `best_snapshot` refers to.
    pub fn best_epoch(&self) -> Option<usize> {
        self.best_epoch
    }

    pub fn min_train_loss(&self) -> Result<f64> {
        self.train_losses.min().ok_or(MonitorError::EmptyHistory)
    }

    pub fn min_val_loss(&self) -> Result<f64> {
        self.val_losses.min().ok_or(MonitorError::EmptyHistory)
    }

    pub fn epochs(&self) -> usize {
        self.train_losses.len()
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    pub fn train_history(&self) -> &[f64] {
        self.train_losses.as_slice()
    }

    pub fn val_history(&self) -> &[f64] {
        self.val_losses.as_slice()
    }

    /// Whether any call to `record` has reported overfitting.
    pub fn stopped(&self) -> bool {
        self.stopped
    }

    fn ensure_recorded(&self) -> Result<()> {
        if self.train_losses.is_empty() {
            return Err(MonitorError::EmptyHistory);
        }
        Ok(())
    }
}
