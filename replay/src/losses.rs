use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LossLogError {
    #[error("Failed to read loss log: {0}")]
    Io(#[from] io::Error),

    #[error("Line {line}: expected 2 or 3 columns, found {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("Line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },

    #[error("Loss log {} contains no epochs", path.display())]
    Empty { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochLosses {
    pub train: f64,
    pub val: f64,
}

pub fn load(path: &Path) -> Result<Vec<EpochLosses>, LossLogError> {
    let file = File::open(path)?;
    let epochs = read(BufReader::new(file))?;
    if epochs.is_empty() {
        return Err(LossLogError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(epochs)
}

/// Parses `train,val` or `epoch,train,val` rows. Blank lines and `#` comments
/// are skipped, as is a non-numeric first row (a header).
pub fn read<R: BufRead>(reader: R) -> Result<Vec<EpochLosses>, LossLogError> {
    let mut epochs = Vec::new();
    let mut seen_row = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if !seen_row && is_header(&columns) {
            seen_row = true;
            continue;
        }
        seen_row = true;

        let (train, val) = match columns.as_slice() {
            [train, val] | [_, train, val] => (
                parse_number(train, line_number)?,
                parse_number(val, line_number)?,
            ),
            _ => {
                return Err(LossLogError::ColumnCount {
                    line: line_number,
                    found: columns.len(),
                })
            }
        };

        epochs.push(EpochLosses { train, val });
    }

    Ok(epochs)
}

fn is_header(columns: &[&str]) -> bool {
    columns.iter().any(|c| c.parse::<f64>().is_err())
}

fn parse_number(value: &str, line: usize) -> Result<f64, LossLogError> {
    value.parse().map_err(|_| LossLogError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}
