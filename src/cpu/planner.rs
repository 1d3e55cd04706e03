//! Plan cache for the CPU engine.
//!
//! Building an FFT plan pre-computes twiddle factors and picks an algorithm for the given
//! length, which is costly compared to running it. Plans are therefore built once per
//! `(length, direction)` and shared between calls and threads.
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;
use rustfft::{Fft, FftDirection, FftPlanner};

/// Forward is for running the regular FFT.
/// Reverse is for running the Inverse Fast Fourier Transform (IFFT)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Negative exponent in the twiddle factor
    Forward,
    /// Positive exponent in the twiddle factor
    Reverse,
}

impl From<Direction> for FftDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => FftDirection::Forward,
            Direction::Reverse => FftDirection::Inverse,
        }
    }
}

#[derive(Default)]
pub(crate) struct PlanCache {
    plans: Mutex<HashMap<(usize, Direction), Arc<dyn Fft<f64>>>>,
}

impl PlanCache {
    /// Returns the plan for `len` points in `direction`, building it on first use.
    ///
    /// Planning runs without holding the lock. If two threads race on the same key, the first
    /// plan stored wins and both callers get it.
    pub(crate) fn plan(&self, len: usize, direction: Direction) -> Arc<dyn Fft<f64>> {
        let key = (len, direction);
        if let Some(plan) = self.lock().get(&key) {
            return Arc::clone(plan);
        }

        debug!("planning {direction:?} FFT of {len} points");
        let plan = FftPlanner::new().plan_fft(len, direction.into());
        Arc::clone(self.lock().entry(key).or_insert(plan))
    }

    // A panic while holding the lock cannot leave the map half-updated.
    fn lock(&self) -> MutexGuard<'_, HashMap<(usize, Direction), Arc<dyn Fft<f64>>>> {
        self.plans.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }
}
