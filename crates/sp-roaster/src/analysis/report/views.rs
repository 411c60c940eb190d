use crate::analysis::classify::{Archetype, Verdict};
use crate::analysis::domain::TargetingType;
use crate::analysis::scoring::{AccountScore, Pillar, ScoreDriver, ScoreTier};
use serde::Serialize;

/// Per-campaign export contract: everything the download view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignView {
    pub campaign_id: String,
    pub campaign_name: String,
    pub archetype: Archetype,
    pub archetype_code: char,
    pub archetype_label: &'static str,
    pub verdict: Verdict,
    pub targeting_type: Option<TargetingType>,
    pub state: Option<String>,
    pub spend: f64,
    pub sales: f64,
    pub acos: f64,
    pub roas: f64,
    pub orders: f64,
    pub clicks: u64,
    pub impressions: u64,
    pub keyword_count: usize,
    pub match_type_count: usize,
    pub product_target_count: usize,
    pub negative_count: u32,
    pub placement_adjustment_count: usize,
    pub ad_group_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarScoreView {
    pub pillar: Pillar,
    pub pillar_label: &'static str,
    pub score: f64,
    pub tier: ScoreTier,
    pub tier_label: &'static str,
    pub applicable: bool,
    pub drivers: Vec<ScoreDriver>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountScoreView {
    pub score: f64,
    pub tier: ScoreTier,
    pub tier_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeDistributionEntry {
    pub archetype: Archetype,
    pub code: char,
    pub label: &'static str,
    pub verdict: Verdict,
    pub campaigns: usize,
    pub spend: f64,
}

/// The dashboard summary contract: account totals, the four pillars, the
/// overall score, and the archetype distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountReportSummary {
    pub total_campaigns: usize,
    pub total_spend: f64,
    pub total_sales: f64,
    pub acos: f64,
    pub roas: f64,
    pub overall: AccountScoreView,
    pub pillars: Vec<PillarScoreView>,
    pub archetype_distribution: Vec<ArchetypeDistributionEntry>,
}

impl AccountScoreView {
    pub(crate) fn from_score(score: &AccountScore) -> Self {
        Self {
            score: score.score,
            tier: score.tier,
            tier_label: score.tier.label(),
        }
    }
}
