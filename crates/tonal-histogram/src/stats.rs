//! Histogram statistics
//!
//! Queries over a channel and an inclusive bin range. Ranges are
//! clamped into `[0, n_bins - 1]`. A histogram without a table, a
//! channel the table does not have, or `start > end` yields the empty
//! result: 0.0, or -1 for the median and the threshold.
//!
//! Bin `i` sits at position `i / (n_bins - 1)` in [0,1].
//!
//! The synthetic `Rgb` channel combines the color slots differently per
//! query: [`get_value`](Histogram::get_value) takes the minimum of the
//! three bins, [`get_maximum`](Histogram::get_maximum) the maximum over
//! all of them, and the range statistics sum them.

use crate::channel::HistogramChannel;
use crate::histogram::Histogram;

/// Threshold returned when no split separates the range
pub const DEFAULT_THRESHOLD: i32 = 127;

/// Median returned for an empty or weightless range
pub const UNDEFINED_MEDIAN: f64 = -1.0;

/// Threshold returned for an empty range
pub const UNDEFINED_THRESHOLD: i32 = -1;

const RGB_SLOTS: [usize; 3] = [1, 2, 3];

/// Summary statistics of one channel over one bin range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramStats {
    /// Total weight
    pub count: f64,
    /// Weighted mean position
    pub mean: f64,
    /// Median position, -1.0 when undefined
    pub median: f64,
    /// Standard deviation of the position
    pub std_dev: f64,
    /// Otsu threshold bin, -1 when undefined
    pub threshold: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Single(usize),
    Rgb,
}

impl Histogram {
    /// Largest bin of a channel; for `Rgb` the largest of the three
    /// color channels' bins.
    pub fn get_maximum(&self, channel: HistogramChannel) -> f64 {
        let Some(slot) = self.resolve(channel) else {
            return 0.0;
        };

        let slots: &[usize] = match slot {
            Slot::Single(ref c) => std::slice::from_ref(c),
            Slot::Rgb => &RGB_SLOTS,
        };

        let mut max = 0.0f64;
        for &c in slots {
            for bin in 0..self.n_bins() {
                max = max.max(self.bin_value(c, bin));
            }
        }
        max
    }

    /// Raw bin value; for `Rgb` the minimum of the three color bins.
    pub fn get_value(&self, channel: HistogramChannel, bin: i32) -> f64 {
        let Some(slot) = self.resolve(channel) else {
            return 0.0;
        };
        let Some(bin) = usize::try_from(bin).ok().filter(|&b| b < self.n_bins()) else {
            return 0.0;
        };

        match slot {
            Slot::Single(c) => self.bin_value(c, bin),
            Slot::Rgb => RGB_SLOTS
                .iter()
                .map(|&c| self.bin_value(c, bin))
                .fold(f64::INFINITY, f64::min),
        }
    }

    /// Total weight in `[start, end]`; for `Rgb` the sum of the red,
    /// green and blue counts.
    pub fn get_count(&self, channel: HistogramChannel, start: i32, end: i32) -> f64 {
        match (self.resolve(channel), self.clamp_range(start, end)) {
            (Some(slot), Some((start, end))) => self.range_count(slot, start, end),
            _ => 0.0,
        }
    }

    /// Weighted mean position over `[start, end]`.
    ///
    /// When the range holds no weight the (zero) weighted sum is
    /// returned as is.
    pub fn get_mean(&self, channel: HistogramChannel, start: i32, end: i32) -> f64 {
        let (Some(slot), Some((start, end))) = (self.resolve(channel), self.clamp_range(start, end))
        else {
            return 0.0;
        };

        let mean: f64 = (start..=end)
            .map(|bin| self.position(bin) * self.slot_sum(slot, bin))
            .sum();
        let count = self.range_count(slot, start, end);

        if count > 0.0 { mean / count } else { mean }
    }

    /// Smallest position at which the running weight from `start`
    /// passes half the range's total, or -1.0.
    pub fn get_median(&self, channel: HistogramChannel, start: i32, end: i32) -> f64 {
        let (Some(slot), Some((start, end))) = (self.resolve(channel), self.clamp_range(start, end))
        else {
            return UNDEFINED_MEDIAN;
        };

        let count = self.range_count(slot, start, end);
        let mut sum = 0.0;
        for bin in start..=end {
            sum += self.slot_sum(slot, bin);
            if sum * 2.0 > count {
                return self.position(bin);
            }
        }

        UNDEFINED_MEDIAN
    }

    /// Standard deviation of the position over `[start, end]`.
    ///
    /// The variance divides by the range's weight, or by 1 when it has
    /// none.
    pub fn get_std_dev(&self, channel: HistogramChannel, start: i32, end: i32) -> f64 {
        let (Some(slot), Some((lo, hi))) = (self.resolve(channel), self.clamp_range(start, end))
        else {
            return 0.0;
        };

        let mean = self.get_mean(channel, start, end);
        let mut count = self.range_count(slot, lo, hi);
        if count == 0.0 {
            count = 1.0;
        }

        let dev: f64 = (lo..=hi)
            .map(|bin| {
                let d = self.position(bin) - mean;
                self.slot_sum(slot, bin) * d * d
            })
            .sum();

        (dev / count).sqrt()
    }

    /// Otsu threshold over `[start, end]`, as an absolute bin index.
    ///
    /// The split maximizing the between-class variance wins. A run of
    /// equally good adjacent splits, which happens across empty bins,
    /// resolves to its middle; of several separate runs the first is
    /// taken. When no split leaves weight on both sides the result is 127.
    ///
    /// N. Otsu, "A threshold selection method from gray-level histograms",
    /// IEEE Trans. Systems, Man, and Cybernetics 9(1), 1979.
    pub fn get_threshold(&self, channel: HistogramChannel, start: i32, end: i32) -> i32 {
        let (Some(slot), Some((start, end))) = (self.resolve(channel), self.clamp_range(start, end))
        else {
            return UNDEFINED_THRESHOLD;
        };

        let hist: Vec<f64> = (start..=end).map(|bin| self.slot_sum(slot, bin)).collect();
        let maxval = end - start;

        let mut chist = vec![0.0f64; maxval + 1];
        let mut cmom = vec![0.0f64; maxval + 1];
        chist[0] = hist[0];
        for i in 1..=maxval {
            chist[i] = chist[i - 1] + hist[i];
            cmom[i] = cmom[i - 1] + i as f64 * hist[i];
        }

        let chist_max = chist[maxval];
        let cmom_max = cmom[maxval];
        let mut bvar_max = 0.0;
        let mut best: Option<(usize, usize)> = None;

        for i in 0..maxval {
            if chist[i] > 0.0 && chist[i] < chist_max {
                let mut bvar = cmom[i] / chist[i];
                bvar -= (cmom_max - cmom[i]) / (chist_max - chist[i]);
                bvar *= bvar;
                bvar *= chist[i];
                bvar *= chist_max - chist[i];

                if bvar > bvar_max {
                    bvar_max = bvar;
                    best = Some((i, i));
                } else if bvar == bvar_max {
                    // Empty bins repeat the same split; only the first
                    // contiguous run of maxima counts
                    if let Some((_, last)) = best.as_mut() {
                        if *last + 1 == i {
                            *last = i;
                        }
                    }
                }
            }
        }

        match best {
            Some((first, last)) => (start + (first + last) / 2) as i32,
            None => DEFAULT_THRESHOLD,
        }
    }

    /// All range statistics of one channel at once.
    pub fn stats(&self, channel: HistogramChannel, start: i32, end: i32) -> HistogramStats {
        HistogramStats {
            count: self.get_count(channel, start, end),
            mean: self.get_mean(channel, start, end),
            median: self.get_median(channel, start, end),
            std_dev: self.get_std_dev(channel, start, end),
            threshold: self.get_threshold(channel, start, end),
        }
    }

    /// Map a selector to a slot of the current table.
    fn resolve(&self, channel: HistogramChannel) -> Option<Slot> {
        if !self.has_values() {
            return None;
        }

        match channel {
            HistogramChannel::Rgb => (self.n_channels() >= 4).then_some(Slot::Rgb),
            // The gray alpha channel is in slot 1
            HistogramChannel::Alpha if self.n_channels() == 3 => Some(Slot::Single(1)),
            _ => {
                let index = channel.index();
                (index < self.n_channels()).then_some(Slot::Single(index))
            }
        }
    }

    fn clamp_range(&self, start: i32, end: i32) -> Option<(usize, usize)> {
        if start > end {
            return None;
        }
        let last = self.n_bins() as i64 - 1;
        let start = i64::from(start).clamp(0, last) as usize;
        let end = i64::from(end).clamp(0, last) as usize;
        Some((start, end))
    }

    #[inline]
    fn position(&self, bin: usize) -> f64 {
        bin as f64 / (self.n_bins() - 1) as f64
    }

    #[inline]
    fn slot_sum(&self, slot: Slot, bin: usize) -> f64 {
        match slot {
            Slot::Single(c) => self.bin_value(c, bin),
            Slot::Rgb => RGB_SLOTS.iter().map(|&c| self.bin_value(c, bin)).sum(),
        }
    }

    fn range_count(&self, slot: Slot, start: usize, end: usize) -> f64 {
        match slot {
            Slot::Single(c) => (start..=end).map(|bin| self.bin_value(c, bin)).sum(),
            Slot::Rgb => RGB_SLOTS
                .iter()
                .map(|&c| self.range_count(Slot::Single(c), start, end))
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Histogram with the given shape and `(slot, bin, weight)` entries.
    fn filled(n_channels: usize, n_bins: usize, entries: &[(usize, usize, f64)]) -> Histogram {
        let mut h = Histogram::new(false);
        h.ensure_capacity(n_channels, n_bins).unwrap();
        let table = h.table_mut();
        for &(slot, bin, weight) in entries {
            table[slot * n_bins + bin] += weight;
        }
        h
    }

    #[test]
    fn test_empty_sentinels() {
        let h = Histogram::new(false);
        for channel in HistogramChannel::ALL {
            assert_eq!(h.get_maximum(channel), 0.0);
            assert_eq!(h.get_value(channel, 0), 0.0);
            assert_eq!(h.get_count(channel, 0, 255), 0.0);
            assert_eq!(h.get_mean(channel, 0, 255), 0.0);
            assert_eq!(h.get_median(channel, 0, 255), -1.0);
            assert_eq!(h.get_std_dev(channel, 0, 255), 0.0);
            assert_eq!(h.get_threshold(channel, 0, 255), -1);
        }
    }

    #[test]
    fn test_missing_channel() {
        let h = filled(2, 256, &[(0, 10, 5.0), (1, 10, 5.0)]);
        assert_eq!(h.get_count(HistogramChannel::Value, 0, 255), 5.0);
        assert_eq!(h.get_count(HistogramChannel::Green, 0, 255), 0.0);
        assert_eq!(h.get_count(HistogramChannel::Rgb, 0, 255), 0.0);
        assert_eq!(h.get_median(HistogramChannel::Rgb, 0, 255), -1.0);
        assert_eq!(h.get_threshold(HistogramChannel::Alpha, 0, 255), -1);
        assert_eq!(h.get_maximum(HistogramChannel::Rgb), 0.0);
    }

    #[test]
    fn test_reversed_range() {
        let h = filled(2, 256, &[(0, 10, 5.0)]);
        assert_eq!(h.get_count(HistogramChannel::Value, 20, 10), 0.0);
        assert_eq!(h.get_median(HistogramChannel::Value, 20, 10), -1.0);
        assert_eq!(h.get_threshold(HistogramChannel::Value, 20, 10), -1);
    }

    #[test]
    fn test_range_clamped() {
        let h = filled(2, 256, &[(0, 0, 1.0), (0, 255, 2.0)]);
        assert_eq!(h.get_count(HistogramChannel::Value, -100, 1000), 3.0);
        assert_eq!(h.get_count(HistogramChannel::Value, -5, -1), 1.0);
        assert_eq!(h.get_count(HistogramChannel::Value, 300, 400), 2.0);
        assert_eq!(h.get_value(HistogramChannel::Value, 256), 0.0);
        assert_eq!(h.get_value(HistogramChannel::Value, -1), 0.0);
    }

    #[test]
    fn test_gray_alpha_remap() {
        let h = filled(3, 256, &[(0, 40, 2.0), (1, 200, 3.0)]);
        assert_eq!(h.get_value(HistogramChannel::Alpha, 200), 3.0);
        assert_eq!(h.get_count(HistogramChannel::Alpha, 0, 255), 3.0);
        assert_eq!(h.get_maximum(HistogramChannel::Alpha), 3.0);
        assert_eq!(h.get_median(HistogramChannel::Alpha, 0, 255), 200.0 / 255.0);
    }

    #[test]
    fn test_rgb_combination_rules() {
        let h = filled(
            4,
            256,
            &[
                (1, 50, 4.0),
                (2, 50, 2.0),
                (3, 50, 6.0),
                (1, 60, 9.0),
                (3, 70, 1.0),
            ],
        );
        // Minimum across channels at a bin
        assert_eq!(h.get_value(HistogramChannel::Rgb, 50), 2.0);
        assert_eq!(h.get_value(HistogramChannel::Rgb, 60), 0.0);
        // Sum of per-channel counts
        assert_eq!(h.get_count(HistogramChannel::Rgb, 0, 255), 22.0);
        // Maximum over the union
        assert_eq!(h.get_maximum(HistogramChannel::Rgb), 9.0);
    }

    #[test]
    fn test_mean_and_std_dev() {
        let h = filled(2, 256, &[(0, 0, 1.0), (0, 255, 1.0)]);
        assert!((h.get_mean(HistogramChannel::Value, 0, 255) - 0.5).abs() < 1e-12);
        assert!((h.get_std_dev(HistogramChannel::Value, 0, 255) - 0.5).abs() < 1e-12);

        let single = filled(2, 256, &[(0, 51, 3.0)]);
        assert!((single.get_mean(HistogramChannel::Value, 0, 255) - 0.2).abs() < 1e-12);
        assert!(single.get_std_dev(HistogramChannel::Value, 0, 255).abs() < 1e-12);
    }

    #[test]
    fn test_mean_zero_count() {
        let h = filled(2, 256, &[(0, 200, 1.0)]);
        assert_eq!(h.get_mean(HistogramChannel::Value, 0, 100), 0.0);
        assert_eq!(h.get_std_dev(HistogramChannel::Value, 0, 100), 0.0);
        assert_eq!(h.get_median(HistogramChannel::Value, 0, 100), -1.0);
    }

    #[test]
    fn test_median_single_bin() {
        let h = filled(2, 1024, &[(0, 300, 7.0)]);
        assert_eq!(h.get_median(HistogramChannel::Value, 0, 1023), 300.0 / 1023.0);
        assert_eq!(h.get_median(HistogramChannel::Value, 300, 300), 300.0 / 1023.0);
    }

    #[test]
    fn test_median_split() {
        // Running sum must strictly exceed half
        let h = filled(2, 256, &[(0, 10, 1.0), (0, 20, 1.0)]);
        assert_eq!(h.get_median(HistogramChannel::Value, 0, 255), 20.0 / 255.0);
        let h = filled(2, 256, &[(0, 10, 2.0), (0, 20, 1.0)]);
        assert_eq!(h.get_median(HistogramChannel::Value, 0, 255), 10.0 / 255.0);
    }

    #[test]
    fn test_threshold_two_clusters() {
        let h = filled(2, 256, &[(0, 10, 100.0), (0, 200, 100.0)]);
        let t = h.get_threshold(HistogramChannel::Value, 0, 255);
        assert!(t > 10 && t < 200, "threshold {t}");
        assert_eq!(t, 104);
    }

    #[test]
    fn test_threshold_separate_maxima() {
        // Splits 0..=89 and 120..=209 tie; 90..=119 is weaker
        let h = filled(
            2,
            256,
            &[(0, 0, 1.0), (0, 90, 1.0), (0, 120, 1.0), (0, 210, 1.0)],
        );
        let t = h.get_threshold(HistogramChannel::Value, 0, 255);
        assert_eq!(t, 44);

        let between = |split: usize| {
            let bins = [0usize, 90, 120, 210];
            let (lo, hi): (Vec<f64>, Vec<f64>) = (
                bins.iter().filter(|&&b| b <= split).map(|&b| b as f64).collect(),
                bins.iter().filter(|&&b| b > split).map(|&b| b as f64).collect(),
            );
            let mean = |v: &[f64]| v.iter().sum::<f64>() / v.len() as f64;
            let d = mean(&lo) - mean(&hi);
            d * d * lo.len() as f64 * hi.len() as f64
        };
        let best = (0..210).map(between).fold(0.0f64, f64::max);
        assert_eq!(between(t as usize), best);
    }

    #[test]
    fn test_threshold_subrange_offset() {
        let h = filled(2, 256, &[(0, 60, 5.0), (0, 90, 5.0)]);
        let t = h.get_threshold(HistogramChannel::Value, 50, 100);
        assert!((60..90).contains(&t), "threshold {t}");
    }

    #[test]
    fn test_threshold_degenerate() {
        let single = filled(2, 256, &[(0, 42, 9.0)]);
        assert_eq!(single.get_threshold(HistogramChannel::Value, 0, 255), 127);
        assert_eq!(single.get_threshold(HistogramChannel::Value, 42, 42), 127);
        let empty = filled(2, 256, &[]);
        assert_eq!(empty.get_threshold(HistogramChannel::Value, 0, 255), 127);
    }

    #[test]
    fn test_stats_snapshot() {
        let h = filled(2, 256, &[(0, 10, 100.0), (0, 200, 100.0)]);
        let stats = h.stats(HistogramChannel::Value, 0, 255);
        assert_eq!(stats.count, 200.0);
        assert_eq!(stats.median, 200.0 / 255.0);
        assert_eq!(stats.threshold, h.get_threshold(HistogramChannel::Value, 0, 255));
        assert_eq!(stats.mean, h.get_mean(HistogramChannel::Value, 0, 255));
    }
}
