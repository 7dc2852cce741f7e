use serde::{Deserialize, Serialize};
use std::fmt;

/// Relevance score clamped to [0.0, 1.0].
///
/// Individual scoring signals may sum past 1.0; construction clamps, so a
/// score can never leave the range regardless of signal combination.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct RelevanceScore(f64);

impl RelevanceScore {
    /// Maximum relevance — categorical enumerations assign this directly.
    pub const MAX: RelevanceScore = RelevanceScore(1.0);

    /// Create a new score, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Chaos-weighted composite: `score × (1 + chaos)`.
    /// Ranges over [0.0, 2.0]; used for final ordering, never thresholding.
    pub fn weighted(self, chaos: f64) -> f64 {
        self.0 * (1.0 + chaos.clamp(0.0, 1.0))
    }
}

impl Default for RelevanceScore {
    fn default() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for RelevanceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for RelevanceScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<RelevanceScore> for f64 {
    fn from(s: RelevanceScore) -> Self {
        s.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_on_construction() {
        assert_eq!(RelevanceScore::new(1.7).value(), 1.0);
        assert_eq!(RelevanceScore::new(-0.2).value(), 0.0);
        assert_eq!(RelevanceScore::new(0.42).value(), 0.42);
    }

    #[test]
    fn weighted_composite_scales_with_chaos() {
        let s = RelevanceScore::new(0.5);
        assert_eq!(s.weighted(0.0), 0.5);
        assert_eq!(s.weighted(1.0), 1.0);
        // Out-of-range chaos is clamped, not propagated.
        assert_eq!(s.weighted(3.0), 1.0);
    }
}
