use serde::{Deserialize, Serialize};

/// Discrete recency bucket with an associated decay weight.
///
/// Consumed by injection-priority layers when blending retrieval output
/// with conversational recency; deliberately not part of the retrieval
/// relevance score itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Epoch {
    /// Referenced within the last 30 days.
    Recent,
    /// 31–60 days.
    Fading,
    /// 61–180 days.
    Midterm,
    /// Older, or missing a timestamp entirely.
    Longterm,
}

impl Epoch {
    /// Decay weight applied multiplicatively by injection scoring.
    pub fn weight(self) -> f64 {
        match self {
            Epoch::Recent => 1.0,
            Epoch::Fading => 0.7,
            Epoch::Midterm => 0.4,
            Epoch::Longterm => 0.2,
        }
    }

    /// Bucket for an age in whole days.
    pub fn from_days(days: i64) -> Self {
        if days <= 30 {
            Epoch::Recent
        } else if days <= 60 {
            Epoch::Fading
        } else if days <= 180 {
            Epoch::Midterm
        } else {
            Epoch::Longterm
        }
    }
}
