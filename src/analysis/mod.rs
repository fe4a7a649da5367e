//! Analysis modules.
//!
//! Pure computations over a response set: metrics, the health score and
//! recommendation, strength tallies and quote extraction.

pub mod metrics;
pub mod quotes;
pub mod recommend;
pub mod strengths;

pub use metrics::compute_metrics;
pub use quotes::{extract_quotes, KeywordFilter, QuestionField};
pub use recommend::compute_health_and_recommendation;
pub use strengths::tally_strengths;
