use crate::analysis::domain::{Entity, EntityState, MatchType, RawRow, TargetingType};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Per-campaign roll-up of one bulk sheet.
///
/// Performance totals (spend/sales/orders/clicks/impressions) sum the
/// campaign-level rows only, where the sheet reports campaign totals;
/// structural facts fold over every row for the id. Built exclusively through
/// [`aggregate_campaigns`], whose combining function is commutative, so the
/// result is identical for any input row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignAggregate {
    pub campaign_id: String,
    pub campaign_name: String,
    pub state: Option<EntityState>,
    pub targeting_type: Option<TargetingType>,
    pub spend: f64,
    pub sales: f64,
    pub orders: f64,
    pub clicks: u64,
    pub impressions: u64,
    pub keywords: BTreeMap<MatchType, BTreeSet<String>>,
    pub product_targets: BTreeSet<String>,
    pub negative_keywords: u32,
    pub negative_product_targets: u32,
    pub adjusted_placements: BTreeSet<String>,
    pub ad_groups: BTreeSet<String>,
    pub ad_ids: BTreeSet<String>,
    pub asins: BTreeSet<String>,
}

impl CampaignAggregate {
    fn empty(campaign_id: &str) -> Self {
        Self {
            campaign_id: campaign_id.to_string(),
            campaign_name: String::new(),
            state: None,
            targeting_type: None,
            spend: 0.0,
            sales: 0.0,
            orders: 0.0,
            clicks: 0,
            impressions: 0,
            keywords: BTreeMap::new(),
            product_targets: BTreeSet::new(),
            negative_keywords: 0,
            negative_product_targets: 0,
            adjusted_placements: BTreeSet::new(),
            ad_groups: BTreeSet::new(),
            ad_ids: BTreeSet::new(),
            asins: BTreeSet::new(),
        }
    }

    /// Fold one row into the aggregate. Sums, set unions, and min-ties only,
    /// so absorbing rows in any order produces the same value.
    fn absorb(&mut self, row: &RawRow) {
        if let Some(ad_group) = &row.ad_group_id {
            self.ad_groups.insert(ad_group.clone());
        }

        match &row.entity {
            Entity::Campaign => {
                self.spend += row.spend;
                self.sales += row.sales;
                self.orders += row.orders;
                self.clicks += row.clicks;
                self.impressions += row.impressions;

                if let Some(name) = &row.campaign_name {
                    // Several campaign rows disagreeing on the name resolve to
                    // the lexicographic minimum to stay order-independent.
                    if self.campaign_name.is_empty() || *name < self.campaign_name {
                        self.campaign_name = name.clone();
                    }
                }
                if let Some(state) = &row.state {
                    let state = state.clone();
                    self.state = match self.state.take() {
                        Some(existing) => Some(existing.min(state)),
                        None => Some(state),
                    };
                }
                if let Some(targeting) = row.targeting_type {
                    // Conflicts resolve to Auto (the smaller variant).
                    self.targeting_type = match self.targeting_type {
                        Some(existing) => Some(existing.min(targeting)),
                        None => Some(targeting),
                    };
                }
            }
            Entity::Keyword => {
                if let Some(text) = &row.keyword_text {
                    let match_type = row.match_type.clone().unwrap_or(MatchType::Exact);
                    self.keywords
                        .entry(match_type)
                        .or_default()
                        .insert(text.to_ascii_lowercase());
                }
            }
            Entity::ProductTargeting => {
                if let Some(expression) = &row.product_targeting_expression {
                    self.product_targets.insert(expression.clone());
                }
            }
            Entity::NegativeKeyword => self.negative_keywords += 1,
            Entity::NegativeProductTargeting => self.negative_product_targets += 1,
            Entity::BiddingAdjustment => {
                if row.percentage != 0.0 {
                    let placement = row
                        .placement
                        .clone()
                        .unwrap_or_else(|| "(unspecified)".to_string());
                    self.adjusted_placements.insert(placement);
                }
            }
            Entity::ProductAd => {
                if let Some(ad_id) = &row.ad_id {
                    self.ad_ids.insert(ad_id.clone());
                }
                if let Some(asin) = &row.asin {
                    self.asins.insert(asin.to_ascii_uppercase());
                }
            }
            Entity::AdGroup | Entity::Other(_) => {}
        }
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.values().map(BTreeSet::len).sum()
    }

    pub fn match_type_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn product_target_count(&self) -> usize {
        self.product_targets.len()
    }

    /// Keyword plus product targets; the denominator for negative coverage.
    pub fn target_count(&self) -> usize {
        self.keyword_count() + self.product_target_count()
    }

    pub fn negative_count(&self) -> u32 {
        self.negative_keywords + self.negative_product_targets
    }

    pub fn placement_adjustment_count(&self) -> usize {
        self.adjusted_placements.len()
    }

    pub fn ad_group_count(&self) -> usize {
        self.ad_groups.len()
    }

    pub fn acos(&self) -> f64 {
        if self.sales > 0.0 {
            self.spend / self.sales
        } else {
            0.0
        }
    }

    pub fn roas(&self) -> f64 {
        if self.spend > 0.0 {
            self.sales / self.spend
        } else {
            0.0
        }
    }
}

/// Group rows by campaign id and fold each group. Output is ordered by
/// campaign id, so downstream results are deterministic.
pub fn aggregate_campaigns(rows: &[RawRow]) -> Vec<CampaignAggregate> {
    let mut by_campaign: BTreeMap<&str, CampaignAggregate> = BTreeMap::new();

    for row in rows {
        by_campaign
            .entry(row.campaign_id.as_str())
            .or_insert_with(|| CampaignAggregate::empty(&row.campaign_id))
            .absorb(row);
    }

    by_campaign.into_values().collect()
}
