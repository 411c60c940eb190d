use serde::{Deserialize, Serialize};

/// Pillar weights for the overall account score. Must sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarWeights {
    pub structure: f64,
    pub automation: f64,
    pub funneling: f64,
    pub bid_adjustments: f64,
}

impl PillarWeights {
    pub fn sum(&self) -> f64 {
        self.structure + self.automation + self.funneling + self.bid_adjustments
    }
}

impl Default for PillarWeights {
    fn default() -> Self {
        // The original 50/20/15/15 point split.
        Self {
            structure: 0.50,
            automation: 0.20,
            funneling: 0.15,
            bid_adjustments: 0.15,
        }
    }
}

/// Lower bounds of the Fair/Good/Excellent tiers; anything below `fair`
/// is Poor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBreakpoints {
    pub fair: f64,
    pub good: f64,
    pub excellent: f64,
}

impl Default for TierBreakpoints {
    fn default() -> Self {
        Self {
            fair: 40.0,
            good: 60.0,
            excellent: 80.0,
        }
    }
}

/// Target band for the Auto share of spend, in percent of total spend.
/// Inside the ideal band scores full marks; below it or up to the tolerable
/// ceiling scores half; beyond the ceiling scores zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationBand {
    pub ideal_min_pct: f64,
    pub ideal_max_pct: f64,
    pub tolerable_max_pct: f64,
}

impl Default for AutomationBand {
    fn default() -> Self {
        Self {
            ideal_min_pct: 10.0,
            ideal_max_pct: 30.0,
            tolerable_max_pct: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: PillarWeights,
    pub breakpoints: TierBreakpoints,
    pub automation_band: AutomationBand,
    /// Campaigns below this spend are ignored by the Funneling and Bid
    /// Adjustments pillars.
    pub min_campaign_spend: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: PillarWeights::default(),
            breakpoints: TierBreakpoints::default(),
            automation_band: AutomationBand::default(),
            min_campaign_spend: 1.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("pillar weights sum to {sum}, expected 1.0")]
    InvalidWeights { sum: f64 },
    #[error("tier breakpoints must satisfy 0 <= fair <= good <= excellent <= 100")]
    InvalidBreakpoints,
    #[error("automation band must satisfy 0 <= ideal_min <= ideal_max <= tolerable_max <= 100")]
    InvalidAutomationBand,
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::InvalidWeights { sum });
        }

        let b = &self.breakpoints;
        if !(0.0 <= b.fair && b.fair <= b.good && b.good <= b.excellent && b.excellent <= 100.0) {
            return Err(ConfigError::InvalidBreakpoints);
        }

        let band = &self.automation_band;
        if !(0.0 <= band.ideal_min_pct
            && band.ideal_min_pct <= band.ideal_max_pct
            && band.ideal_max_pct <= band.tolerable_max_pct
            && band.tolerable_max_pct <= 100.0)
        {
            return Err(ConfigError::InvalidAutomationBand);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        ScoringConfig::default().validate().expect("defaults hold");
    }

    #[test]
    fn weights_must_sum_to_one() {
        let mut config = ScoringConfig::default();
        config.weights.structure = 0.9;

        match config.validate() {
            Err(ConfigError::InvalidWeights { sum }) => assert!((sum - 1.4).abs() < 1e-9),
            other => panic!("expected invalid weights, got {other:?}"),
        }
    }

    #[test]
    fn breakpoints_must_be_ordered() {
        let mut config = ScoringConfig::default();
        config.breakpoints.good = 90.0;
        config.breakpoints.excellent = 80.0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBreakpoints)
        ));
    }
}
