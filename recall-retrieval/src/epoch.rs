//! Fragment epoch classification.
//!
//! Buckets a fragment's age into a discrete epoch with a decay weight,
//! used by the injection scorer to fade stale context out of prompts.

use chrono::{DateTime, Utc};

use recall_core::models::Epoch;
use recall_core::Fragment;
use tracing::debug;

/// An epoch assignment for one fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochAssignment {
    pub epoch: Epoch,
    pub weight: f64,
}

/// Classify a fragment by its best available timestamp. A fragment with
/// no timestamp at all degrades to the oldest bucket rather than erroring.
pub fn classify(fragment: &Fragment, now: DateTime<Utc>) -> EpochAssignment {
    let epoch = match fragment.best_timestamp() {
        Some(ts) => Epoch::from_days((now - ts).num_days()),
        None => {
            debug!(id = %fragment.id, "no timestamp, degrading to longterm epoch");
            Epoch::Longterm
        }
    };
    EpochAssignment {
        epoch,
        weight: epoch.weight(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn aged(days: i64, now: DateTime<Utc>) -> Fragment {
        Fragment {
            id: "t".into(),
            content: "x".into(),
            timestamp: Some(now - Duration::days(days)),
            ..Fragment::default()
        }
    }

    #[test]
    fn buckets_follow_age() {
        let now = Utc::now();
        assert_eq!(classify(&aged(3, now), now).epoch, Epoch::Recent);
        assert_eq!(classify(&aged(45, now), now).epoch, Epoch::Fading);
        assert_eq!(classify(&aged(120, now), now).epoch, Epoch::Midterm);
        assert_eq!(classify(&aged(400, now), now).epoch, Epoch::Longterm);
    }

    #[test]
    fn last_referenced_refreshes_the_epoch() {
        let now = Utc::now();
        let mut f = aged(400, now);
        f.last_referenced = Some(now - Duration::days(2));
        let assignment = classify(&f, now);
        assert_eq!(assignment.epoch, Epoch::Recent);
        assert_eq!(assignment.weight, 1.0);
    }

    #[test]
    fn missing_timestamp_degrades_to_longterm() {
        let f = Fragment {
            id: "t".into(),
            content: "x".into(),
            ..Fragment::default()
        };
        let assignment = classify(&f, Utc::now());
        assert_eq!(assignment.epoch, Epoch::Longterm);
        assert_eq!(assignment.weight, 0.2);
    }
}
