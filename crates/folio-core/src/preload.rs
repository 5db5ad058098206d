//! Progress accounting for the asset preloader.
//!
//! Every attempt resolves exactly once, success or failure, and both count
//! as done. The percentage never goes backwards and an empty batch is
//! complete immediately.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadOutcome {
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadProgress {
    total: usize,
    completed: usize,
    failed: usize,
    percent: u8,
}

impl PreloadProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            failed: 0,
            percent: if total == 0 { 100 } else { 0 },
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }

    /// Records one resolved attempt and returns the new percentage.
    /// Extra reports past `total` are ignored.
    pub fn record(&mut self, outcome: PreloadOutcome) -> u8 {
        if self.is_complete() {
            return self.percent;
        }
        self.completed += 1;
        if outcome == PreloadOutcome::Failed {
            self.failed += 1;
        }
        let percent = (100.0 * self.completed as f64 / self.total as f64).round() as u8;
        self.percent = self.percent.max(percent);
        self.percent
    }
}
