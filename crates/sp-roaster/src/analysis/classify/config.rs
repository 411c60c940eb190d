use serde::{Deserialize, Serialize};

/// Tunable thresholds for the archetype rules. These are business rules, not
/// algorithmic constants; tests vary them without touching the rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Negatives-per-target ratio at or above which a campaign counts as
    /// negative-protected.
    pub negative_coverage_ratio: f64,
    /// A campaign is fragmented when its ad-group count exceeds this multiple
    /// of its target count.
    pub fragmentation_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            negative_coverage_ratio: 0.25,
            fragmentation_ratio: 1.0,
        }
    }
}
