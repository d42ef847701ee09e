//! Equal-width binning.

use serde::{Deserialize, Serialize};

/// One histogram bin. The last bin of a histogram is closed on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    /// Width of the bin.
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Display label, e.g. `10.00-18.75`.
    pub fn label(&self) -> String {
        format!("{:.2}-{:.2}", self.start, self.end)
    }
}

/// Split `[min, max]` of `values` into `bins` equal-width bins.
///
/// Empty input (or zero bins) yields no bins. When every value is equal all
/// of them land in the first bin.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let n = bins as f64;
    // Ranges wider than f64::MAX are split without ever forming `max - min`.
    let overflowed = !(max - min).is_finite();
    let width = if overflowed { max / n - min / n } else { (max - min) / n };
    let edge = |i: usize| {
        if i == bins {
            max
        } else if overflowed {
            let t = i as f64 / n;
            min * (1.0 - t) + max * t
        } else {
            min + width * i as f64
        }
    };

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: edge(i),
            end: edge(i + 1),
            count: 0,
        })
        .collect();

    for &value in values {
        let offset = if overflowed { value / width - min / width } else { (value - min) / width };
        let index = if width > 0.0 {
            (offset.floor() as usize).min(bins - 1)
        } else {
            0
        };
        result[index].count += 1;
    }

    result
}
