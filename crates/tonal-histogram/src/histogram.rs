//! Histogram - Per-channel table of accumulated weights
//!
//! The table is `n_channels x n_bins` doubles stored channel-major.
//! Slot 0 is the derived value channel and slots 1.. mirror the raw
//! components of the accumulation format.
//!
//! # Lifecycle
//!
//! A new histogram holds no table. [`Histogram::calculate`] sizes and
//! fills it, [`Histogram::clear`] releases it. A table whose shape is
//! unchanged is zeroed in place rather than reallocated, so repeated
//! recomputation over the same kind of source does not churn the
//! allocator.

use crate::channel::HistogramChannel;
use crate::error::{HistogramError, HistogramResult};
use crate::notify::{HistogramEvent, HistogramObserver, Notifier};
use std::sync::Arc;
use tracing::debug;

/// Bin count reported by a histogram that has never been filled
pub const DEFAULT_N_BINS: usize = 256;

/// Largest channel count: value plus four components
pub const MAX_CHANNELS: usize = 5;

/// Per-channel histogram of a pixel region
///
/// # Examples
///
/// ```
/// use tonal_histogram::{Histogram, HistogramChannel};
///
/// let histogram = Histogram::new(false);
/// assert!(!histogram.has_values());
/// assert_eq!(histogram.n_bins(), 256);
/// assert_eq!(histogram.get_count(HistogramChannel::Value, 0, 255), 0.0);
/// ```
#[derive(Debug)]
pub struct Histogram {
    /// Accumulate in perceptual rather than linear encoding
    gamma_correct: bool,
    /// Value channel plus one per component, 0 when empty
    n_channels: usize,
    /// Bins per channel
    n_bins: usize,
    /// Channel-major weights, empty when no table is held
    values: Vec<f64>,
    notifier: Notifier,
}

impl Histogram {
    /// Create an empty histogram.
    ///
    /// `gamma_correct` selects perceptual encoding for sources stored
    /// linearly; perceptual sources are always accumulated perceptually.
    pub fn new(gamma_correct: bool) -> Self {
        Self {
            gamma_correct,
            n_channels: 0,
            n_bins: DEFAULT_N_BINS,
            values: Vec::new(),
            notifier: Notifier::default(),
        }
    }

    /// Create an independent copy holding the same table.
    ///
    /// Observers are not copied.
    pub fn duplicate(&self) -> Self {
        Self {
            gamma_correct: self.gamma_correct,
            n_channels: self.n_channels,
            n_bins: self.n_bins,
            values: self.values.clone(),
            notifier: Notifier::default(),
        }
    }

    /// Check whether accumulation is perceptual for linear sources.
    #[inline]
    pub fn gamma_correct(&self) -> bool {
        self.gamma_correct
    }

    /// Number of channel slots, including the value channel.
    #[inline]
    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    /// Number of raw components, excluding the value channel.
    #[inline]
    pub fn n_components(&self) -> usize {
        self.n_channels.saturating_sub(1)
    }

    /// Number of bins per channel.
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Check whether a table is held.
    #[inline]
    pub fn has_values(&self) -> bool {
        !self.values.is_empty()
    }

    /// Bins of one channel slot, if it exists.
    pub fn channel_values(&self, slot: usize) -> Option<&[f64]> {
        if slot >= self.n_channels {
            return None;
        }
        let start = slot * self.n_bins;
        self.values.get(start..start + self.n_bins)
    }

    /// Bytes held by the value table.
    pub fn memsize(&self) -> usize {
        if self.has_values() {
            self.n_channels * self.n_bins * std::mem::size_of::<f64>()
        } else {
            0
        }
    }

    /// Register an observer for change notifications.
    pub fn connect(&mut self, observer: Arc<dyn HistogramObserver>) {
        self.notifier.connect(observer);
    }

    /// Number of registered observers.
    pub fn n_observers(&self) -> usize {
        self.notifier.n_observers()
    }

    /// Release the value table and reset the channel count.
    pub fn clear(&mut self) {
        if self.has_values() {
            self.values = Vec::new();
            self.notifier.notify(HistogramEvent::Values);
        }

        if self.n_channels != 0 {
            self.n_channels = 0;
            self.notifier.notify(HistogramEvent::NChannels);
        }
    }

    /// Prepare a zeroed table of the given shape.
    ///
    /// Returns `true` when the table was reallocated because the shape
    /// changed, `false` when the existing table was zeroed in place.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_channels` is outside `2..=5` or `n_bins < 2`.
    pub fn ensure_capacity(&mut self, n_channels: usize, n_bins: usize) -> HistogramResult<bool> {
        if !(2..=MAX_CHANNELS).contains(&n_channels) {
            return Err(HistogramError::InvalidParameters(format!(
                "channel count must be 2..={}, got {}",
                MAX_CHANNELS, n_channels
            )));
        }
        if n_bins < 2 {
            return Err(HistogramError::InvalidParameters(format!(
                "bin count must be >= 2, got {}",
                n_bins
            )));
        }

        self.notifier.freeze();
        let reallocated = self.reset_table(n_channels, n_bins);
        self.notifier.notify(HistogramEvent::Values);
        self.notifier.thaw();

        Ok(reallocated)
    }

    /// Value of raw component `component` at `bin`.
    ///
    /// Components are counted from 0. With more than three slots
    /// component 0 is red; otherwise it is the value/gray slot.
    pub fn get_component(&self, component: usize, bin: i32) -> f64 {
        let slot = if self.n_channels > 3 {
            component + 1
        } else {
            component
        };

        match HistogramChannel::from_index(slot) {
            Some(HistogramChannel::Rgb) | None => 0.0,
            Some(channel) => self.get_value(channel, bin),
        }
    }

    /// Zero or reallocate the table for a new shape.
    pub(crate) fn reset_table(&mut self, n_channels: usize, n_bins: usize) -> bool {
        if n_channels == self.n_channels && n_bins == self.n_bins && self.has_values() {
            self.values.fill(0.0);
            return false;
        }

        self.clear();

        if n_channels != self.n_channels {
            self.n_channels = n_channels;
            self.notifier.notify(HistogramEvent::NChannels);
        }

        if n_bins != self.n_bins {
            self.n_bins = n_bins;
            self.notifier.notify(HistogramEvent::NBins);
        }

        self.values = vec![0.0; n_channels * n_bins];
        debug!(n_channels, n_bins, "allocated histogram table");
        true
    }

    #[inline]
    pub(crate) fn bin_value(&self, slot: usize, bin: usize) -> f64 {
        self.values[slot * self.n_bins + bin]
    }

    pub(crate) fn table_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub(crate) fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn record(histogram: &mut Histogram) -> Arc<Mutex<Vec<HistogramEvent>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        histogram.connect(Arc::new(move |event: HistogramEvent| {
            sink.lock().unwrap().push(event)
        }));
        log
    }

    #[test]
    fn test_new_is_empty() {
        let h = Histogram::new(true);
        assert!(h.gamma_correct());
        assert!(!h.has_values());
        assert_eq!(h.n_channels(), 0);
        assert_eq!(h.n_components(), 0);
        assert_eq!(h.n_bins(), DEFAULT_N_BINS);
        assert_eq!(h.memsize(), 0);
        assert!(h.channel_values(0).is_none());
    }

    #[test]
    fn test_ensure_capacity_reuse() {
        let mut h = Histogram::new(false);
        assert!(h.ensure_capacity(4, 256).unwrap());
        assert_eq!(h.n_channels(), 4);
        assert_eq!(h.memsize(), 4 * 256 * 8);

        h.table_mut()[10] = 3.0;
        assert!(!h.ensure_capacity(4, 256).unwrap());
        assert_eq!(h.bin_value(0, 10), 0.0);

        assert!(h.ensure_capacity(4, 1024).unwrap());
        assert_eq!(h.n_bins(), 1024);
        assert!(h.ensure_capacity(2, 1024).unwrap());
        assert_eq!(h.channel_values(1).unwrap().len(), 1024);
        assert!(h.channel_values(2).is_none());
    }

    #[test]
    fn test_ensure_capacity_invalid() {
        let mut h = Histogram::new(false);
        assert!(h.ensure_capacity(1, 256).is_err());
        assert!(h.ensure_capacity(6, 256).is_err());
        assert!(h.ensure_capacity(2, 1).is_err());
        assert!(!h.has_values());
    }

    #[test]
    fn test_clear() {
        let mut h = Histogram::new(false);
        h.ensure_capacity(2, 256).unwrap();
        let log = record(&mut h);
        h.clear();
        assert!(!h.has_values());
        assert_eq!(h.n_channels(), 0);
        assert_eq!(
            *log.lock().unwrap(),
            vec![HistogramEvent::Values, HistogramEvent::NChannels]
        );

        // A second clear has nothing to release
        h.clear();
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_ensure_capacity_notifications() {
        let mut h = Histogram::new(false);
        let log = record(&mut h);
        h.ensure_capacity(5, 1024).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                HistogramEvent::NChannels,
                HistogramEvent::NBins,
                HistogramEvent::Values
            ]
        );

        log.lock().unwrap().clear();
        h.ensure_capacity(5, 1024).unwrap();
        assert_eq!(*log.lock().unwrap(), vec![HistogramEvent::Values]);
    }

    #[test]
    fn test_duplicate_independent() {
        let mut h = Histogram::new(true);
        h.ensure_capacity(3, 256).unwrap();
        h.table_mut()[5] = 2.5;
        let _log = record(&mut h);

        let mut dup = h.duplicate();
        assert_eq!(dup.n_observers(), 0);
        assert_eq!(dup.bin_value(0, 5), 2.5);
        dup.table_mut()[5] = 7.0;
        assert_eq!(h.bin_value(0, 5), 2.5);
        dup.clear();
        assert!(h.has_values());
    }

    #[test]
    fn test_get_component_shift() {
        let mut h = Histogram::new(false);
        h.ensure_capacity(5, 256).unwrap();
        let n_bins = h.n_bins();
        // Red slot, bin 7
        h.table_mut()[n_bins + 7] = 4.0;
        assert_eq!(h.get_component(0, 7), 4.0);

        let mut gray = Histogram::new(false);
        gray.ensure_capacity(2, 256).unwrap();
        gray.table_mut()[7] = 1.5;
        assert_eq!(gray.get_component(0, 7), 1.5);
        assert_eq!(gray.get_component(4, 7), 0.0);
    }
}
