//! # Upload progress
//!
//! An upload is observed as a stream of [`UploadEvent`]s: zero or more
//! `Progress` ticks with non-decreasing percentages, then exactly one terminal
//! `Finished` or `Failed`. Concurrent uploads are folded into a single number
//! by [`ProgressAggregate`].

use crate::error::UploadError;
use crate::models::UploadResult;

/// One item of an upload's event stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadEvent {
    /// Percentage of bytes handed to the transport, 0..=100.
    Progress(u8),
    Finished(UploadResult),
    Failed(UploadError),
}

impl UploadEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, UploadEvent::Progress(_))
    }
}

/// Percentage of `sent` out of `total`, rounded, clamped to 100.
pub fn percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (sent.saturating_mul(100) + total / 2) / total;
    pct.min(100) as u8
}

/// Mean progress over a fixed number of concurrent uploads.
///
/// Every slot starts at 0. The reported value is the arithmetic mean of the
/// slots rounded to the nearest integer, so it reaches 100 exactly when every
/// slot does. It is not weighted by file size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressAggregate {
    slots: Vec<u8>,
}

impl ProgressAggregate {
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![0; count],
        }
    }

    /// Record a tick for slot `index` and return the new aggregate.
    /// A slot never moves backwards.
    pub fn update(&mut self, index: usize, pct: u8) -> u8 {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = (*slot).max(pct.min(100));
        }
        self.percent()
    }

    pub fn percent(&self) -> u8 {
        if self.slots.is_empty() {
            return 100;
        }
        let n = self.slots.len() as u32;
        let sum: u32 = self.slots.iter().map(|&p| p as u32).sum();
        ((sum + n / 2) / n) as u8
    }
}
