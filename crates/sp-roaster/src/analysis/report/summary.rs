use super::views::{
    AccountReportSummary, AccountScoreView, ArchetypeDistributionEntry, CampaignView,
    PillarScoreView,
};
use crate::analysis::classify::{Archetype, ClassifiedCampaign};
use crate::analysis::scoring::{AccountScore, PillarScore};
use std::collections::BTreeMap;

/// The complete result of one audit run: classified campaigns, the four
/// pillar scores (in pillar order), and the overall account score. Derived
/// fresh per run; nothing persists.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountReport {
    pub campaigns: Vec<ClassifiedCampaign>,
    pub pillars: Vec<PillarScore>,
    pub overall: AccountScore,
}

impl AccountReport {
    pub fn summary(&self) -> AccountReportSummary {
        let total_spend: f64 = self.campaigns.iter().map(|c| c.aggregate.spend).sum();
        let total_sales: f64 = self.campaigns.iter().map(|c| c.aggregate.sales).sum();

        let pillars = self
            .pillars
            .iter()
            .map(|pillar| PillarScoreView {
                pillar: pillar.pillar,
                pillar_label: pillar.pillar.label(),
                score: pillar.score,
                tier: pillar.tier,
                tier_label: pillar.tier.label(),
                applicable: pillar.applicable,
                drivers: pillar.drivers.clone(),
            })
            .collect();

        AccountReportSummary {
            total_campaigns: self.campaigns.len(),
            total_spend,
            total_sales,
            acos: if total_sales > 0.0 {
                total_spend / total_sales
            } else {
                0.0
            },
            roas: if total_spend > 0.0 {
                total_sales / total_spend
            } else {
                0.0
            },
            overall: AccountScoreView::from_score(&self.overall),
            pillars,
            archetype_distribution: self.archetype_distribution(),
        }
    }

    /// Count and spend per archetype, in archetype (A..J) order, skipping
    /// archetypes with no campaigns.
    pub fn archetype_distribution(&self) -> Vec<ArchetypeDistributionEntry> {
        let mut buckets: BTreeMap<Archetype, (usize, f64)> = BTreeMap::new();
        for campaign in &self.campaigns {
            let bucket = buckets.entry(campaign.archetype).or_insert((0, 0.0));
            bucket.0 += 1;
            bucket.1 += campaign.aggregate.spend;
        }

        Archetype::ordered()
            .into_iter()
            .filter_map(|archetype| {
                buckets
                    .get(&archetype)
                    .map(|(campaigns, spend)| ArchetypeDistributionEntry {
                        archetype,
                        code: archetype.code(),
                        label: archetype.label(),
                        verdict: archetype.verdict(),
                        campaigns: *campaigns,
                        spend: *spend,
                    })
            })
            .collect()
    }

    /// One view row per classified campaign, in campaign-id order (the
    /// classifier preserves the aggregator's ordering).
    pub fn campaign_details(&self) -> Vec<CampaignView> {
        self.campaigns
            .iter()
            .map(|campaign| CampaignView {
                campaign_id: campaign.aggregate.campaign_id.clone(),
                campaign_name: campaign.aggregate.campaign_name.clone(),
                archetype: campaign.archetype,
                archetype_code: campaign.archetype.code(),
                archetype_label: campaign.archetype.label(),
                verdict: campaign.archetype.verdict(),
                targeting_type: campaign.aggregate.targeting_type,
                state: campaign
                    .aggregate
                    .state
                    .as_ref()
                    .map(|state| state.label().to_string()),
                spend: campaign.aggregate.spend,
                sales: campaign.aggregate.sales,
                acos: campaign.aggregate.acos(),
                roas: campaign.aggregate.roas(),
                orders: campaign.aggregate.orders,
                clicks: campaign.aggregate.clicks,
                impressions: campaign.aggregate.impressions,
                keyword_count: campaign.aggregate.keyword_count(),
                match_type_count: campaign.aggregate.match_type_count(),
                product_target_count: campaign.aggregate.product_target_count(),
                negative_count: campaign.aggregate.negative_count(),
                placement_adjustment_count: campaign.aggregate.placement_adjustment_count(),
                ad_group_count: campaign.aggregate.ad_group_count(),
            })
            .collect()
    }
}
