mod config;
mod pillars;

pub use config::{AutomationBand, ConfigError, PillarWeights, ScoringConfig, TierBreakpoints};

use crate::analysis::classify::ClassifiedCampaign;
use serde::{Deserialize, Serialize};

/// The four scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Structure,
    AutomationBalance,
    Funneling,
    BidAdjustments,
}

impl Pillar {
    pub const fn ordered() -> [Pillar; 4] {
        [
            Self::Structure,
            Self::AutomationBalance,
            Self::Funneling,
            Self::BidAdjustments,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Structure => "Structure",
            Self::AutomationBalance => "Automation Balance",
            Self::Funneling => "Funneling",
            Self::BidAdjustments => "Bid Adjustments",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ScoreTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    pub fn for_score(score: f64, breakpoints: &TierBreakpoints) -> Self {
        if score >= breakpoints.excellent {
            Self::Excellent
        } else if score >= breakpoints.good {
            Self::Good
        } else if score >= breakpoints.fair {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// A campaign-level contribution behind a pillar score, for the drill-down
/// view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreDriver {
    pub campaign_id: String,
    pub campaign_name: String,
    pub detail: String,
    pub value: f64,
}

/// One normalized pillar score. An empty eligible set yields the defined
/// neutral value: score 0.0 with `applicable` false, never NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarScore {
    pub pillar: Pillar,
    pub score: f64,
    pub tier: ScoreTier,
    pub applicable: bool,
    pub drivers: Vec<ScoreDriver>,
}

impl PillarScore {
    fn neutral(pillar: Pillar, breakpoints: &TierBreakpoints) -> Self {
        Self {
            pillar,
            score: 0.0,
            tier: ScoreTier::for_score(0.0, breakpoints),
            applicable: false,
            drivers: Vec::new(),
        }
    }

    fn applicable(
        pillar: Pillar,
        score: f64,
        breakpoints: &TierBreakpoints,
        drivers: Vec<ScoreDriver>,
    ) -> Self {
        let score = score.clamp(0.0, 100.0);
        Self {
            pillar,
            score,
            tier: ScoreTier::for_score(score, breakpoints),
            applicable: true,
            drivers,
        }
    }
}

/// Weighted combination of the four pillars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountScore {
    pub score: f64,
    pub tier: ScoreTier,
}

/// Stateless scorer applying one validated configuration.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// The four pillar scores, in [`Pillar::ordered`] order.
    pub fn score_pillars(&self, campaigns: &[ClassifiedCampaign]) -> Vec<PillarScore> {
        vec![
            pillars::structure(campaigns, &self.config),
            pillars::automation_balance(campaigns, &self.config),
            pillars::funneling(campaigns, &self.config),
            pillars::bid_adjustments(campaigns, &self.config),
        ]
    }

    /// Pure function of the pillar scores; no campaign re-inspection.
    pub fn score_account(&self, pillars: &[PillarScore]) -> AccountScore {
        let weight = |pillar: Pillar| match pillar {
            Pillar::Structure => self.config.weights.structure,
            Pillar::AutomationBalance => self.config.weights.automation,
            Pillar::Funneling => self.config.weights.funneling,
            Pillar::BidAdjustments => self.config.weights.bid_adjustments,
        };

        let score = pillars
            .iter()
            .map(|pillar| pillar.score * weight(pillar.pillar))
            .sum::<f64>()
            .clamp(0.0, 100.0);

        AccountScore {
            score,
            tier: ScoreTier::for_score(score, &self.config.breakpoints),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::CampaignAggregate;
    use crate::analysis::classify::Archetype;
    use crate::analysis::domain::{MatchType, TargetingType};
    use std::collections::{BTreeMap, BTreeSet};

    fn classified(
        id: &str,
        targeting: TargetingType,
        spend: f64,
        archetype: Archetype,
    ) -> ClassifiedCampaign {
        ClassifiedCampaign {
            aggregate: CampaignAggregate {
                campaign_id: id.to_string(),
                campaign_name: format!("Campaign {id}"),
                state: None,
                targeting_type: Some(targeting),
                spend,
                sales: spend * 2.0,
                orders: 1.0,
                clicks: 10,
                impressions: 1000,
                keywords: BTreeMap::new(),
                product_targets: BTreeSet::new(),
                negative_keywords: 0,
                negative_product_targets: 0,
                adjusted_placements: BTreeSet::new(),
                ad_groups: BTreeSet::new(),
                ad_ids: BTreeSet::new(),
                asins: BTreeSet::new(),
            },
            archetype,
        }
    }

    fn engine() -> ScoringEngine {
        ScoringEngine::new(ScoringConfig::default()).expect("default config valid")
    }

    #[test]
    fn structure_weighs_spend_not_campaign_count() {
        let campaigns = vec![
            classified("c1", TargetingType::Manual, 90.0, Archetype::SingleMatchManual),
            classified("c2", TargetingType::Manual, 10.0, Archetype::Fragmented),
            classified("c3", TargetingType::Auto, 500.0, Archetype::AutoOnly),
        ];

        let scores = engine().score_pillars(&campaigns);
        let structure = &scores[0];
        assert_eq!(structure.pillar, Pillar::Structure);
        assert!(structure.applicable);
        // AutoOnly spend is neutral; 90 good vs 10 bad.
        assert!((structure.score - 90.0).abs() < 1e-9);
        assert_eq!(structure.drivers.len(), 1);
        assert_eq!(structure.drivers[0].campaign_id, "c2");
    }

    #[test]
    fn automation_band_scores_inside_half_and_zero() {
        let mut auto = classified("c1", TargetingType::Auto, 20.0, Archetype::AutoOnly);
        let manual = classified("c2", TargetingType::Manual, 80.0, Archetype::SingleMatchManual);

        let inside = engine().score_pillars(&[auto.clone(), manual.clone()]);
        assert_eq!(inside[1].score, 100.0);

        auto.aggregate.spend = 66.0;
        let beyond = engine().score_pillars(&[auto.clone(), manual.clone()]);
        // 66/146 = 45.2%, within the tolerable ceiling.
        assert_eq!(beyond[1].score, 50.0);

        auto.aggregate.spend = 900.0;
        let extreme = engine().score_pillars(&[auto, manual]);
        assert_eq!(extreme[1].score, 0.0);
    }

    #[test]
    fn all_manual_account_is_penalized_as_below_band() {
        let campaigns = vec![classified(
            "c1",
            TargetingType::Manual,
            100.0,
            Archetype::SingleMatchManual,
        )];

        let scores = engine().score_pillars(&campaigns);
        assert!(scores[1].applicable);
        assert_eq!(scores[1].score, 50.0);
    }

    #[test]
    fn funneling_is_spend_weighted_and_capped() {
        let mut covered = classified("c1", TargetingType::Manual, 100.0, Archetype::NegativeProtected);
        covered
            .aggregate
            .keywords
            .entry(MatchType::Exact)
            .or_default()
            .extend((0..4).map(|i| format!("kw{i}")));
        covered.aggregate.negative_keywords = 8;

        let mut bare = classified("c2", TargetingType::Manual, 300.0, Archetype::NegativeUnprotected);
        bare.aggregate
            .keywords
            .entry(MatchType::Exact)
            .or_default()
            .extend((0..4).map(|i| format!("kw{i}")));

        let scores = engine().score_pillars(&[covered, bare]);
        let funneling = &scores[2];
        // Coverage caps at 1.0: (1.0*100 + 0.0*300) / 400 = 25%.
        assert!((funneling.score - 25.0).abs() < 1e-9);
        assert_eq!(funneling.drivers[0].campaign_id, "c2");
    }

    #[test]
    fn funneling_skips_zero_target_campaigns_without_error() {
        let campaigns = vec![classified(
            "c1",
            TargetingType::Manual,
            50.0,
            Archetype::NegativeUnprotected,
        )];

        let scores = engine().score_pillars(&campaigns);
        assert!(!scores[2].applicable);
        assert_eq!(scores[2].score, 0.0);
    }

    #[test]
    fn bid_adjustment_adoption_is_a_campaign_share() {
        let mut adopted = classified("c1", TargetingType::Manual, 40.0, Archetype::PlacementOptimized);
        adopted
            .aggregate
            .adjusted_placements
            .insert("placement top".to_string());
        let flat = classified("c2", TargetingType::Manual, 40.0, Archetype::SingleMatchManual);
        let tiny = classified("c3", TargetingType::Manual, 0.5, Archetype::SingleMatchManual);

        let scores = engine().score_pillars(&[adopted, flat, tiny]);
        let bids = &scores[3];
        // The sub-threshold campaign is not eligible: 1 of 2.
        assert!((bids.score - 50.0).abs() < 1e-9);
        assert_eq!(bids.drivers.len(), 1);
        assert_eq!(bids.drivers[0].campaign_id, "c2");
    }

    #[test]
    fn empty_account_yields_neutral_pillars_and_poor_overall() {
        let scores = engine().score_pillars(&[]);
        assert_eq!(scores.len(), 4);
        for pillar in &scores {
            assert!(!pillar.applicable);
            assert_eq!(pillar.score, 0.0);
            assert_eq!(pillar.tier, ScoreTier::Poor);
        }

        let overall = engine().score_account(&scores);
        assert_eq!(overall.score, 0.0);
        assert_eq!(overall.tier, ScoreTier::Poor);
    }

    #[test]
    fn overall_score_applies_the_configured_weights() {
        let campaigns = vec![
            classified("c1", TargetingType::Manual, 80.0, Archetype::SingleMatchManual),
            classified("c2", TargetingType::Auto, 20.0, Archetype::AutoOnly),
        ];

        let e = engine();
        let pillars = e.score_pillars(&campaigns);
        let overall = e.score_account(&pillars);

        // Structure 100 * 0.5 + Automation 100 * 0.2; Funneling is neutral
        // (no targets) and Bid Adjustments scores 0.
        assert!((overall.score - 70.0).abs() < 1e-9);
        assert_eq!(overall.tier, ScoreTier::Good);
    }

    #[test]
    fn tier_mapping_respects_custom_breakpoints() {
        let breakpoints = TierBreakpoints {
            fair: 10.0,
            good: 20.0,
            excellent: 30.0,
        };
        assert_eq!(ScoreTier::for_score(5.0, &breakpoints), ScoreTier::Poor);
        assert_eq!(ScoreTier::for_score(10.0, &breakpoints), ScoreTier::Fair);
        assert_eq!(ScoreTier::for_score(29.9, &breakpoints), ScoreTier::Good);
        assert_eq!(ScoreTier::for_score(30.0, &breakpoints), ScoreTier::Excellent);
    }
}
