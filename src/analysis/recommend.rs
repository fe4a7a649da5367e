//! Recommendation engine.
//!
//! Maps metrics to a composite health score, a single recommendation
//! chosen by an ordered rule chain, and a list of short insights.

use crate::models::{Assessment, Metrics, Recommendation};

/// Confidence target on the 1-5 scale.
pub const CONFIDENCE_TARGET: f64 = 3.5;
/// Confidence at or above this is a strong result.
pub const CONFIDENCE_STRONG: f64 = 4.0;
/// Health score at or above this means "keep going".
pub const HEALTHY_SCORE: f64 = 80.0;

/// Composite score in `[0, 100]`, each of the four inputs weighted 25%.
pub fn health_score(metrics: &Metrics) -> f64 {
    (metrics.confidence / 5.0) * 25.0
        + (metrics.excellent_pct / 100.0) * 25.0
        + (metrics.hands_created / 100.0) * 25.0
        + (metrics.pace_just / 100.0) * 25.0
}

/// Select the recommendation. Rules are evaluated top to bottom and the
/// first one that holds wins.
pub fn recommend(metrics: &Metrics, health_score: f64) -> Recommendation {
    if metrics.confidence < CONFIDENCE_TARGET && metrics.hands_created < 40.0 {
        Recommendation::GuidedPractice
    } else if metrics.pace_fast > 30.0 {
        Recommendation::SlowDown
    } else if metrics.pace_slow > 25.0 {
        Recommendation::IncreaseDensity
    } else if health_score >= HEALTHY_SCORE {
        Recommendation::Maintain
    } else {
        Recommendation::FocusOneMetric
    }
}

/// Short insights, each evaluated independently.
pub fn insights(metrics: &Metrics) -> Vec<String> {
    let mut insights = Vec::new();

    if metrics.confidence >= CONFIDENCE_STRONG {
        insights.push("✓ Strong confidence gains".to_string());
    } else if metrics.confidence < CONFIDENCE_TARGET {
        insights.push("⚠ Confidence below 3.5 target".to_string());
    }

    if metrics.hands_created >= 50.0 {
        insights.push("✓ High hands-on deliverable rate".to_string());
    } else if metrics.hands_created < 30.0 {
        insights.push("⚠ Increase guided practice time".to_string());
    }

    if metrics.pace_fast > 20.0 {
        insights.push(format!(
            "⚠ Pacing too fast for {:.0}% of builders",
            metrics.pace_fast
        ));
    }

    insights
}

/// Health score, recommendation and insights for a set of metrics.
pub fn compute_health_and_recommendation(metrics: &Metrics) -> Assessment {
    let score = health_score(metrics);
    let recommendation = recommend(metrics, score);

    Assessment {
        health_score: score,
        recommendation,
        recommendation_text: recommendation.text().to_string(),
        insights: insights(metrics),
    }
}
