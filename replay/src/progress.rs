use indicatif::{ProgressBar, ProgressStyle};

pub struct ReplayProgressBar {
    bar: ProgressBar,
}

impl ReplayProgressBar {
    pub fn new(num_epochs: usize) -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(num_epochs as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} {pos}/{len} [{wide_bar:.cyan/blue}] {msg}")?,
        );
        Ok(Self { bar })
    }

    pub fn update(&self, train_loss: f64, val_loss: f64) {
        self.bar
            .set_message(format!("val: {:.5}, loss: {:.5}", val_loss, train_loss));
        self.bar.inc(1);
    }

    pub fn finish(&self, stopped_at: Option<usize>) {
        match stopped_at {
            Some(epoch) => self.bar.finish_with_message(format!("stopped at epoch {}", epoch)),
            None => self.bar.finish_with_message("completed without stopping"),
        }
    }
}
