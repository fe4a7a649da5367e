//! Facilitator strength tallies.

use crate::analysis::metrics::percent;
use crate::models::{ResponseSet, StrengthTally};
use std::collections::HashMap;

/// Count how often each strength was selected and return the top `limit`.
///
/// Ordered by count, highest first; ties keep the order in which the
/// strengths were first seen.
pub fn tally_strengths(set: &ResponseSet, limit: usize) -> Vec<StrengthTally> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for strength in set.iter().flat_map(|r| r.strengths.iter()) {
        let count = counts.entry(strength.clone()).or_insert_with(|| {
            order.push(strength.clone());
            0
        });
        *count += 1;
    }

    let mut tallies: Vec<StrengthTally> = order
        .into_iter()
        .map(|strength| {
            let count = counts.get(&strength).copied().unwrap_or_default();
            StrengthTally {
                pct: percent(count, set.len()),
                strength,
                count,
            }
        })
        .collect();

    tallies.sort_by_key(|t| std::cmp::Reverse(t.count));
    tallies.truncate(limit);
    tallies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FacilitatorRating, HandsOn, Pace, Response, Scope};

    fn set(strengths: &[&[&str]]) -> ResponseSet {
        let responses = strengths
            .iter()
            .map(|items| Response {
                session: "Advanced Python".to_string(),
                confidence: None,
                facilitator: FacilitatorRating::Good,
                pace: Pace::JustRight,
                hands_on: HandsOn::Created,
                background: None,
                strengths: items.iter().map(|s| s.to_string()).collect(),
                feedback: None,
                commitment: None,
            })
            .collect();
        ResponseSet::new(Scope::default(), responses)
    }

    #[test]
    fn test_tally_orders_by_count_then_first_seen() {
        let set = set(&[
            &["Clear examples", "Patient"],
            &["Good energy", "Patient"],
            &["Clear examples", "Patient"],
            &["Good energy"],
        ]);

        let tallies = tally_strengths(&set, 6);
        let names: Vec<_> = tallies.iter().map(|t| t.strength.as_str()).collect();
        assert_eq!(names, vec!["Patient", "Clear examples", "Good energy"]);
        assert_eq!(tallies[0].count, 3);
        assert_eq!(tallies[0].pct, 75.0);
    }

    #[test]
    fn test_tally_limit_and_empty() {
        let set = set(&[&["A", "B", "C"]]);
        assert_eq!(tally_strengths(&set, 2).len(), 2);

        let empty = ResponseSet::default();
        assert!(tally_strengths(&empty, 6).is_empty());
    }
}
