mod args;
mod checkpoint;
mod losses;
mod progress;
mod replay;
mod summary;

use args::Args;
use clap::Parser;
use log::LevelFilter;
use monitor::TrendMonitor;
use progress::ReplayProgressBar;
use simplelog::{Config, SimpleLogger, WriteLogger};
use std::error::Error;
use std::fs::File;

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    let epochs = losses::load(&args.input)?;
    log::info!("Loaded {} epochs from {:?}", epochs.len(), args.input);

    let spec = args.window_spec();
    log::info!("Monitoring with {:?}", spec);
    let mut monitor = TrendMonitor::new(spec)?;

    let progress = ReplayProgressBar::new(epochs.len())?;
    let summary = replay::replay(&mut monitor, &epochs, &args.checkpoint_dir, Some(&progress))?;

    if args.prune {
        match summary.best_epoch {
            Some(best) => {
                let deleted =
                    checkpoint::prune(&args.checkpoint_dir, summary.epochs_replayed, best)?;
                log::info!("Pruned {} checkpoints, kept epoch {}", deleted, best);
            }
            None => log::warn!("No best epoch selected, skipping pruning"),
        }
    }

    println!("{}", summary);
    Ok(())
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    if let Some(log_file) = &args.log_file {
        WriteLogger::init(
            LevelFilter::Debug,
            Config::default(),
            File::create(log_file)?,
        )?;
    } else {
        SimpleLogger::init(LevelFilter::Info, Config::default())?;
    }

    Ok(args)
}
