use std::error::Error;
use std::path::{Path, PathBuf};

use monitor::{TrendEstimator, TrendMonitor};

use crate::checkpoint;
use crate::losses::EpochLosses;
use crate::progress::ReplayProgressBar;
use crate::summary::Summary;

/// Feeds recorded losses through the monitor the way a training loop would,
/// using each epoch's checkpoint path as its snapshot. Stops at the first
/// overfitting verdict.
pub fn replay<E: TrendEstimator>(
    monitor: &mut TrendMonitor<PathBuf, E>,
    epochs: &[EpochLosses],
    checkpoint_dir: &Path,
    progress: Option<&ReplayProgressBar>,
) -> Result<Summary, Box<dyn Error>> {
    let mut stopped_at = None;

    for (epoch, losses) in epochs.iter().enumerate() {
        let snapshot = checkpoint::path(checkpoint_dir, epoch);
        let should_stop = monitor.record(losses.train, losses.val, snapshot)?;

        if let Some(progress) = progress {
            progress.update(losses.train, losses.val);
        }

        if should_stop {
            log::info!("Early stopping after {} epochs", epoch + 1);
            stopped_at = Some(epoch);
            break;
        }
    }

    if let Some(progress) = progress {
        progress.finish(stopped_at);
    }

    Ok(Summary {
        total_epochs: epochs.len(),
        epochs_replayed: monitor.epochs(),
        stopped_at,
        best_epoch: monitor.best_epoch(),
        best_checkpoint: monitor.best_snapshot()?.cloned(),
        min_train_loss: monitor.min_train_loss()?,
        min_val_loss: monitor.min_val_loss()?,
    })
}
