/// Append-only per-epoch loss values.
#[derive(Debug, Clone, Default)]
pub struct LossHistory {
    values: Vec<f64>,
}

impl LossHistory {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Undoes the last push of a call that failed part way.
    pub(crate) fn pop(&mut self) -> Option<f64> {
        self.values.pop()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// The last `min(lookback, len)` values.
    pub fn window(&self, lookback: usize) -> &[f64] {
        let start = self.values.len().saturating_sub(lookback);
        &self.values[start..]
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    /// Index of the smallest value at or after `from`, first occurrence on ties.
    pub fn argmin_from(&self, from: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &value) in self.values.iter().enumerate().skip(from) {
            match best {
                Some((_, best_value)) if value >= best_value => {}
                _ => best = Some((i, value)),
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Snapshot handles indexed by epoch; `None` where no snapshot was kept.
#[derive(Debug, Clone)]
pub struct SnapshotLog<S> {
    slots: Vec<Option<S>>,
}

impl<S> SnapshotLog<S> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn push(&mut self, snapshot: Option<S>) {
        self.slots.push(snapshot);
    }

    pub fn get(&self, epoch: usize) -> Option<&S> {
        self.slots.get(epoch).and_then(Option::as_ref)
    }
}

impl<S> Default for SnapshotLog<S> {
    fn default() -> Self {
        Self::new()
    }
}
