//! Descriptive statistics shared by the validator and the cleaner.

use std::cmp::Ordering;

/// Streaming mean/variance accumulator (Welford's algorithm).
#[derive(Debug, Clone, Default)]
pub struct StreamingStats {
    count: usize,
    mean: f64,
    m2: f64, // Sum of squared differences from mean
}

impl StreamingStats {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate every value of an iterator.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut stats = Self::new();
        for value in values {
            stats.add(value);
        }
        stats
    }

    /// Add a value.
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Number of values seen.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean, if any values were seen.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sample standard deviation (n - 1 denominator). Needs two values.
    pub fn std(&self) -> Option<f64> {
        (self.count > 1).then(|| (self.m2 / (self.count - 1) as f64).sqrt())
    }
}

/// Mean and spread used to score values by distance from the mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScore {
    pub mean: f64,
    pub std: f64,
}

impl ZScore {
    /// Fit to a set of values.
    ///
    /// Returns `None` when the spread is undefined (fewer than two values) or
    /// exactly zero, since such a distribution cannot be normalized.
    pub fn fit(values: &[f64]) -> Option<Self> {
        let stats = StreamingStats::from_values(values.iter().copied());
        let mean = stats.mean()?;
        let std = stats.std()?;
        if std == 0.0 || !std.is_finite() {
            return None;
        }
        Some(Self { mean, std })
    }

    /// Absolute z-score of a value.
    pub fn score(&self, value: f64) -> f64 {
        ((value - self.mean) / self.std).abs()
    }

    /// Returns true if the value lies more than `threshold` deviations out.
    pub fn is_outlier(&self, value: f64, threshold: f64) -> bool {
        self.score(value) > threshold
    }
}

/// Median of a set of values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / total` as a percentage rounded to two decimals; zero when empty.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(part as f64 / total as f64 * 100.0)
    }
}
