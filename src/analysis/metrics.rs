//! Metrics engine.
//!
//! Turns a response set into the fixed [`Metrics`] summary. Pure and
//! stateless: the same set always yields the same metrics.

use crate::models::{BucketCounts, FacilitatorRating, HandsOn, Metrics, PaceBucket, ResponseSet};

/// Compute the metrics for a response set.
///
/// Every categorical percentage uses the full response count as its
/// denominator, so unknown labels and blank answers lower the percentages
/// without landing in any bucket. Confidence is the mean over valid
/// values only.
pub fn compute_metrics(set: &ResponseSet) -> Metrics {
    if set.is_empty() {
        return Metrics::default();
    }
    let total = set.len();

    let mut counts = BucketCounts::default();
    let mut confidence_sum = 0.0;
    let mut confidence_n = 0usize;

    for response in set.iter() {
        if let Some(value) = response.confidence {
            confidence_sum += value;
            confidence_n += 1;
        }

        match response.facilitator {
            FacilitatorRating::Excellent => counts.excellent += 1,
            FacilitatorRating::Good => counts.good += 1,
            _ => {}
        }

        match response.pace.bucket() {
            Some(PaceBucket::Just) => counts.pace_just += 1,
            Some(PaceBucket::Fast) => counts.pace_fast += 1,
            Some(PaceBucket::Slow) => counts.pace_slow += 1,
            None => {}
        }

        match response.hands_on {
            HandsOn::Created => counts.hands_created += 1,
            HandsOn::Followed => counts.hands_followed += 1,
            _ => {}
        }
    }

    let confidence = if confidence_n == 0 {
        0.0
    } else {
        confidence_sum / confidence_n as f64
    };

    let hands_created = percent(counts.hands_created, total);
    let hands_followed = percent(counts.hands_followed, total);

    Metrics {
        total,
        confidence,
        excellent_pct: percent(counts.excellent, total),
        good_pct: percent(counts.excellent + counts.good, total),
        pace_just: percent(counts.pace_just, total),
        pace_fast: percent(counts.pace_fast, total),
        pace_slow: percent(counts.pace_slow, total),
        hands_created,
        hands_followed,
        hands_completion: hands_created + hands_followed,
        counts,
    }
}

/// `count / total * 100`, multiplying before dividing so that sums of
/// disjoint buckets never round above 100.
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count * 100) as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pace, Response, Scope};

    fn response() -> Response {
        Response {
            session: "Advanced Python".to_string(),
            confidence: None,
            facilitator: FacilitatorRating::Unknown,
            pace: Pace::Unknown,
            hands_on: HandsOn::Unknown,
            background: None,
            strengths: vec![],
            feedback: None,
            commitment: None,
        }
    }

    fn set(responses: Vec<Response>) -> ResponseSet {
        ResponseSet::new(Scope::default(), responses)
    }

    fn assert_percentages_in_range(m: &Metrics) {
        for value in [
            m.excellent_pct,
            m.good_pct,
            m.pace_just,
            m.pace_fast,
            m.pace_slow,
            m.hands_created,
            m.hands_followed,
            m.hands_completion,
        ] {
            assert!((0.0..=100.0).contains(&value), "out of range: {}", value);
        }
    }

    #[test]
    fn test_empty_set_is_all_zero() {
        let empty = set(vec![]);
        assert!(empty.is_empty());

        let metrics = compute_metrics(&empty);
        assert_eq!(metrics, Metrics::default());
        assert_eq!(metrics.total, 0);
        assert_eq!(metrics.confidence, 0.0);
        assert_eq!(metrics.hands_completion, 0.0);
    }

    #[test]
    fn test_rating_percentages() {
        let ratings = [
            FacilitatorRating::Excellent,
            FacilitatorRating::Excellent,
            FacilitatorRating::Good,
            FacilitatorRating::Good,
        ];
        let responses = ratings
            .iter()
            .map(|rating| Response {
                facilitator: *rating,
                ..response()
            })
            .collect();

        let metrics = compute_metrics(&set(responses));
        assert_eq!(metrics.excellent_pct, 50.0);
        assert_eq!(metrics.good_pct, 100.0);
        assert_eq!(metrics.counts.excellent, 2);
        assert_eq!(metrics.counts.good, 2);
    }

    #[test]
    fn test_unknown_pace_is_excluded_from_buckets() {
        let responses = vec![
            Response {
                pace: Pace::JustRight,
                ..response()
            },
            Response {
                pace: Pace::Unknown,
                ..response()
            },
        ];

        let metrics = compute_metrics(&set(responses));
        assert_eq!(metrics.total, 2);
        assert_eq!(metrics.pace_just, 50.0);
        assert_eq!(metrics.pace_fast, 0.0);
        assert_eq!(metrics.pace_slow, 0.0);
        assert_eq!(metrics.pace_just + metrics.pace_fast + metrics.pace_slow, 50.0);
    }

    #[test]
    fn test_confidence_ignores_invalid_values() {
        let responses = vec![
            Response {
                confidence: Some(5.0),
                ..response()
            },
            Response {
                confidence: None,
                ..response()
            },
            Response {
                confidence: Some(3.0),
                ..response()
            },
        ];

        let metrics = compute_metrics(&set(responses));
        assert_eq!(metrics.confidence, 4.0);
    }

    #[test]
    fn test_confidence_zero_without_valid_values() {
        let metrics = compute_metrics(&set(vec![response(), response()]));
        assert_eq!(metrics.total, 2);
        assert_eq!(metrics.confidence, 0.0);
    }

    #[test]
    fn test_hands_on_completion() {
        let responses = vec![
            Response {
                hands_on: HandsOn::Created,
                ..response()
            },
            Response {
                hands_on: HandsOn::Followed,
                ..response()
            },
            Response {
                hands_on: HandsOn::Followed,
                ..response()
            },
            Response {
                hands_on: HandsOn::NoTime,
                ..response()
            },
        ];

        let metrics = compute_metrics(&set(responses));
        assert_eq!(metrics.hands_created, 25.0);
        assert_eq!(metrics.hands_followed, 50.0);
        assert_eq!(metrics.hands_completion, 75.0);
    }

    #[test]
    fn test_percentages_stay_in_range() {
        // 2 created + 9 followed out of 11 rounds above 100 if divided first.
        let mut responses = vec![
            Response {
                hands_on: HandsOn::Created,
                ..response()
            };
            2
        ];
        responses.extend(vec![
            Response {
                hands_on: HandsOn::Followed,
                pace: Pace::TooAdvanced,
                facilitator: FacilitatorRating::Excellent,
                ..response()
            };
            9
        ]);

        let metrics = compute_metrics(&set(responses));
        assert_percentages_in_range(&metrics);
        assert_eq!(
            metrics.hands_completion,
            metrics.hands_created + metrics.hands_followed
        );
    }

    #[test]
    fn test_compute_is_idempotent() {
        let responses = vec![
            Response {
                confidence: Some(4.0),
                facilitator: FacilitatorRating::Excellent,
                pace: Pace::SlightlyTooSlow,
                hands_on: HandsOn::Created,
                ..response()
            },
            response(),
        ];
        let set = set(responses);

        let first = compute_metrics(&set);
        let second = compute_metrics(&set);
        assert_eq!(first, second);
    }

    #[test]
    fn test_percent_handles_zero_total() {
        assert_eq!(percent(3, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}
