use std::{fmt, path::PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_epochs: usize,
    pub epochs_replayed: usize,
    pub stopped_at: Option<usize>,
    pub best_epoch: Option<usize>,
    pub best_checkpoint: Option<PathBuf>,
    pub min_train_loss: f64,
    pub min_val_loss: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Replay Summary")?;
        writeln!(f, "{}", "=".repeat(40))?;
        writeln!(
            f,
            "Epochs replayed: {}/{}",
            self.epochs_replayed, self.total_epochs
        )?;

        match self.stopped_at {
            Some(epoch) => writeln!(f, "Stopped at epoch: {}", epoch)?,
            None => writeln!(f, "Stopped at epoch: -")?,
        }

        match (&self.best_epoch, &self.best_checkpoint) {
            (Some(epoch), Some(path)) => {
                writeln!(f, "Best epoch: {} ({})", epoch, path.display())?
            }
            (Some(epoch), None) => writeln!(f, "Best epoch: {} (no checkpoint kept)", epoch)?,
            _ => writeln!(f, "Best epoch: -")?,
        }

        writeln!(f, "Min train loss: {:.5}", self.min_train_loss)?;
        write!(f, "Min val loss: {:.5}", self.min_val_loss)
    }
}
