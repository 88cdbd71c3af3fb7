use crate::foundation::core::Point;
use std::collections::VecDeque;

/// Recent position of a trailed particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSample {
    /// Sampled position.
    pub pos: Point,
    /// Alpha at sampling time.
    pub alpha: f64,
}

/// Bounded FIFO of recent positions; the oldest sample is evicted first.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail {
    samples: VecDeque<TrailSample>,
    cap: usize,
}

impl Trail {
    /// Empty trail holding at most `cap` samples. Storage is allocated on first push.
    pub fn new(cap: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            cap: cap.max(1),
        }
    }

    /// Maximum number of retained samples.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Return `true` when no samples are retained.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append a sample, evicting the oldest one when full.
    pub fn push(&mut self, pos: Point, alpha: f64) {
        if self.samples.len() == self.cap {
            self.samples.pop_front();
        }
        self.samples.push_back(TrailSample { pos, alpha });
    }

    /// Drop every sample but keep the storage.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TrailSample> {
        self.samples.iter()
    }

    /// Samples oldest first, each paired with its position weight `index / len` (older samples
    /// are fainter).
    pub fn weighted(&self) -> impl Iterator<Item = (&TrailSample, f64)> {
        let n = self.samples.len().max(1) as f64;
        self.samples
            .iter()
            .enumerate()
            .map(move |(i, s)| (s, i as f64 / n))
    }

    /// Move this trail's storage into `other`, leaving `other` empty with `other`'s capacity.
    pub(crate) fn donate_storage(&mut self, other: &mut Trail) {
        self.samples.clear();
        std::mem::swap(&mut self.samples, &mut other.samples);
        other.samples.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/trail.rs"]
mod tests;
