//! Channel selectors

use std::fmt;

/// Channel selector for histogram queries
///
/// Slot 0 is always the derived value channel. `Red`, `Green`, `Blue`
/// and `Alpha` address slots 1 to 4; `Rgb` is synthetic and combines
/// the three color slots, each query with its own rule.
///
/// A gray histogram has only the value slot; a gray+alpha histogram
/// keeps its alpha in slot 1, and queries for `Alpha` are redirected
/// there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistogramChannel {
    /// Derived value: gray, or max(R, G, B)
    Value,
    /// Red slot
    Red,
    /// Green slot
    Green,
    /// Blue slot
    Blue,
    /// Alpha slot
    Alpha,
    /// Red, green and blue combined
    Rgb,
}

impl HistogramChannel {
    /// All selectors in slot order.
    pub const ALL: [HistogramChannel; 6] = [
        HistogramChannel::Value,
        HistogramChannel::Red,
        HistogramChannel::Green,
        HistogramChannel::Blue,
        HistogramChannel::Alpha,
        HistogramChannel::Rgb,
    ];

    /// Selector for a raw slot index; 5 is `Rgb`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Raw slot index of the selector; `Rgb` is 5.
    pub fn index(self) -> usize {
        match self {
            HistogramChannel::Value => 0,
            HistogramChannel::Red => 1,
            HistogramChannel::Green => 2,
            HistogramChannel::Blue => 3,
            HistogramChannel::Alpha => 4,
            HistogramChannel::Rgb => 5,
        }
    }

    fn name(self) -> &'static str {
        match self {
            HistogramChannel::Value => "value",
            HistogramChannel::Red => "red",
            HistogramChannel::Green => "green",
            HistogramChannel::Blue => "blue",
            HistogramChannel::Alpha => "alpha",
            HistogramChannel::Rgb => "rgb",
        }
    }
}

impl fmt::Display for HistogramChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
