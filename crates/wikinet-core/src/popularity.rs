//! Dataset-wide quantile splits.
//!
//! Thresholds are computed once over the full article set and then frozen,
//! so an article's band never depends on which subset is being browsed.

use crate::Popularity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantile with linear interpolation between closest ranks.
///
/// `q` in `[0, 1]`. `None` for empty input or NaN values.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || values.iter().any(|v| v.is_nan()) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Frozen quartile thresholds over view counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopularityScale {
    /// 25th percentile.
    pub q1: f64,
    /// Median.
    pub q2: f64,
    /// 75th percentile.
    pub q3: f64,
}

impl PopularityScale {
    /// Thresholds over every view count. `None` when there are none.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_views<I>(views: I) -> Option<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let values: Vec<f64> = views.into_iter().map(|v| v as f64).collect();
        Some(Self {
            q1: quantile(&values, 0.25)?,
            q2: quantile(&values, 0.5)?,
            q3: quantile(&values, 0.75)?,
        })
    }

    /// Band for a view count. Upper bounds are inclusive.
    #[allow(clippy::cast_precision_loss)]
    pub fn classify(&self, views: u64) -> Popularity {
        let v = views as f64;
        if v <= self.q1 {
            Popularity::Low
        } else if v <= self.q2 {
            Popularity::Medium
        } else if v <= self.q3 {
            Popularity::High
        } else {
            Popularity::VeryHigh
        }
    }
}

/// Coarse High/Low label for a global centrality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CentralityBand {
    /// Below the 75th percentile.
    Low,
    /// At or above the 75th percentile.
    High,
}

impl fmt::Display for CentralityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::High => "High",
        })
    }
}

/// Frozen cut-off separating [`CentralityBand::High`] from `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThreshold(pub f64);

impl BandThreshold {
    /// 75th percentile of `values`. `None` when there are none.
    pub fn upper_quartile<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        quantile(&values, 0.75).map(Self)
    }

    /// Band of one score.
    pub fn band(&self, value: f64) -> CentralityBand {
        if value >= self.0 {
            CentralityBand::High
        } else {
            CentralityBand::Low
        }
    }
}
