use std::{error::Error, fs, path::Path, path::PathBuf};

pub fn path(dir: &Path, epoch: usize) -> PathBuf {
    dir.join(format!("model_epoch_{}.safetensors", epoch))
}

pub fn delete(dir: &Path, epoch: usize) -> Result<bool, Box<dyn Error>> {
    let checkpoint_path = path(dir, epoch);
    if checkpoint_path.exists() {
        fs::remove_file(&checkpoint_path)?;
        return Ok(true);
    }
    Ok(false)
}

/// Removes the checkpoints of every epoch in `0..epochs` except `keep`.
/// Returns how many files were deleted.
pub fn prune(dir: &Path, epochs: usize, keep: usize) -> Result<usize, Box<dyn Error>> {
    let mut deleted = 0;
    for epoch in (0..epochs).filter(|&epoch| epoch != keep) {
        if delete(dir, epoch)? {
            log::debug!("Deleted checkpoint for epoch {}", epoch);
            deleted += 1;
        }
    }
    Ok(deleted)
}
