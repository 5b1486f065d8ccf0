use std::path::PathBuf;

use clap::Parser;
use monitor::WindowSpec;

#[derive(Parser, Debug, Clone)]
#[command(name = "Loss Replay")]
#[command(author = "Jørgen Hanssen <jorgen@hanssen.io>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Loss log with one `train_loss,val_loss` pair per epoch.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of trailing epochs used for trend detection.
    #[arg(long, default_value_t = 5)]
    pub lookback: usize,

    /// Degree of the polynomial fitted to each window.
    #[arg(long, default_value_t = 1, conflicts_with = "tolerance")]
    pub degree: usize,

    /// Use bounded-variation trend detection with this step tolerance.
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Directory holding per-epoch checkpoints.
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: PathBuf,

    /// Delete every checkpoint except the best one once training would stop.
    #[arg(long, default_value_t = false)]
    pub prune: bool,

    /// Write a debug log to this file instead of logging to stdout.
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn window_spec(&self) -> WindowSpec {
        match self.tolerance {
            Some(tolerance) => WindowSpec::tolerance(self.lookback, tolerance),
            None => WindowSpec::slope(self.lookback, self.degree),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor::Strategy;

    #[test]
    fn test_defaults_select_linear_slope() {
        let args = Args::parse_from(["replay", "--input", "losses.csv"]);
        assert_eq!(args.window_spec(), WindowSpec::slope(5, 1));
        assert_eq!(args.checkpoint_dir, PathBuf::from("checkpoints"));
        assert!(!args.prune);
    }

    #[test]
    fn test_tolerance_selects_tolerance_strategy() {
        let args = Args::parse_from([
            "replay",
            "--input",
            "losses.csv",
            "--lookback",
            "8",
            "--tolerance",
            "0.02",
        ]);
        let spec = args.window_spec();
        assert_eq!(spec.lookback, 8);
        assert_eq!(spec.strategy, Strategy::Tolerance { tolerance: 0.02 });
    }

    #[test]
    fn test_degree_conflicts_with_tolerance() {
        let result = Args::try_parse_from([
            "replay",
            "--input",
            "losses.csv",
            "--degree",
            "2",
            "--tolerance",
            "0.1",
        ]);
        assert!(result.is_err());
    }
}
