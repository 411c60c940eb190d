mod config;
mod rules;

pub use config::ClassifierConfig;

use crate::analysis::aggregate::CampaignAggregate;
use crate::analysis::domain::TargetingType;
use crate::analysis::sheet::sibling_base_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structural archetypes, one per campaign, codes A through J.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    AutoOnly,
    SingleMatchManual,
    MultiMatchMixed,
    ProductTargetingOnly,
    NegativeProtected,
    NegativeUnprotected,
    PlacementOptimized,
    Dormant,
    Fragmented,
    Unclassified,
}

/// Practice quality attached to an archetype, used by the definitions view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Good,
    NeedsWork,
    Bad,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good practice",
            Self::NeedsWork => "Needs work",
            Self::Bad => "Bad practice",
        }
    }
}

impl Archetype {
    pub const fn ordered() -> [Archetype; 10] {
        [
            Self::AutoOnly,
            Self::SingleMatchManual,
            Self::MultiMatchMixed,
            Self::ProductTargetingOnly,
            Self::NegativeProtected,
            Self::NegativeUnprotected,
            Self::PlacementOptimized,
            Self::Dormant,
            Self::Fragmented,
            Self::Unclassified,
        ]
    }

    pub const fn code(self) -> char {
        match self {
            Self::AutoOnly => 'A',
            Self::SingleMatchManual => 'B',
            Self::MultiMatchMixed => 'C',
            Self::ProductTargetingOnly => 'D',
            Self::NegativeProtected => 'E',
            Self::NegativeUnprotected => 'F',
            Self::PlacementOptimized => 'G',
            Self::Dormant => 'H',
            Self::Fragmented => 'I',
            Self::Unclassified => 'J',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AutoOnly => "Auto-Only",
            Self::SingleMatchManual => "Single-Match Manual",
            Self::MultiMatchMixed => "Multi-Match Mixed",
            Self::ProductTargetingOnly => "Product-Targeting Only",
            Self::NegativeProtected => "Negative-Protected",
            Self::NegativeUnprotected => "Negative-Unprotected",
            Self::PlacementOptimized => "Placement-Optimized",
            Self::Dormant => "Dormant",
            Self::Fragmented => "Fragmented",
            Self::Unclassified => "Unclassified",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::AutoOnly => "Auto-targeting discovery campaign with no manual counterpart",
            Self::SingleMatchManual => "Manual campaign whose keywords share one match type",
            Self::MultiMatchMixed => "Manual campaign mixing several match types",
            Self::ProductTargetingOnly => "Manual campaign targeting products or categories only",
            Self::NegativeProtected => "Negatives cover enough of the target list to funnel traffic",
            Self::NegativeUnprotected => "No negatives at all; irrelevant searches leak spend",
            Self::PlacementOptimized => "Uses placement-level bid adjustments",
            Self::Dormant => "No clicks and no spend in the lookback window",
            Self::Fragmented => "More ad groups than its target list justifies",
            Self::Unclassified => "Structure matches none of the defined patterns",
        }
    }

    pub const fn verdict(self) -> Verdict {
        match self {
            Self::SingleMatchManual | Self::ProductTargetingOnly | Self::PlacementOptimized => {
                Verdict::Good
            }
            Self::AutoOnly | Self::NegativeProtected | Self::Dormant => Verdict::NeedsWork,
            Self::MultiMatchMixed
            | Self::NegativeUnprotected
            | Self::Fragmented
            | Self::Unclassified => Verdict::Bad,
        }
    }

    pub fn definitions() -> Vec<ArchetypeDefinition> {
        Self::ordered()
            .into_iter()
            .map(|archetype| ArchetypeDefinition {
                archetype,
                code: archetype.code(),
                label: archetype.label(),
                description: archetype.description(),
                verdict: archetype.verdict(),
                verdict_label: archetype.verdict().label(),
            })
            .collect()
    }
}

/// One entry of the archetype reference table.
#[derive(Debug, Clone, Serialize)]
pub struct ArchetypeDefinition {
    pub archetype: Archetype,
    pub code: char,
    pub label: &'static str,
    pub description: &'static str,
    pub verdict: Verdict,
    pub verdict_label: &'static str,
}

/// A campaign aggregate with its assigned archetype.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedCampaign {
    pub aggregate: CampaignAggregate,
    pub archetype: Archetype,
}

/// Cross-campaign facts the per-campaign rules need: the base names of all
/// Manual campaigns, for auto/manual sibling detection.
#[derive(Debug, Default)]
pub struct AccountContext {
    manual_base_names: BTreeSet<String>,
}

impl AccountContext {
    pub fn build(campaigns: &[CampaignAggregate]) -> Self {
        let manual_base_names = campaigns
            .iter()
            .filter(|campaign| campaign.targeting_type == Some(TargetingType::Manual))
            .map(|campaign| sibling_base_name(&campaign.campaign_name))
            .filter(|base| !base.is_empty())
            .collect();

        Self { manual_base_names }
    }

    pub fn has_manual_sibling(&self, campaign_name: &str) -> bool {
        let base = sibling_base_name(campaign_name);
        !base.is_empty() && self.manual_base_names.contains(&base)
    }
}

/// Stateless classifier applying the ordered rule table. For a fixed
/// aggregate, context, and configuration the label is a pure function.
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, campaign: &CampaignAggregate, context: &AccountContext) -> Archetype {
        rules::RULES
            .iter()
            .find(|rule| (rule.matches)(campaign, context, &self.config))
            .map(|rule| rule.archetype)
            .unwrap_or(Archetype::Unclassified)
    }

    pub fn classify_all(&self, campaigns: Vec<CampaignAggregate>) -> Vec<ClassifiedCampaign> {
        let context = AccountContext::build(&campaigns);

        campaigns
            .into_iter()
            .map(|aggregate| {
                let archetype = self.classify(&aggregate, &context);
                ClassifiedCampaign { aggregate, archetype }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::domain::MatchType;
    use std::collections::{BTreeMap, BTreeSet};

    fn aggregate(id: &str, name: &str, targeting: Option<TargetingType>) -> CampaignAggregate {
        CampaignAggregate {
            campaign_id: id.to_string(),
            campaign_name: name.to_string(),
            state: None,
            targeting_type: targeting,
            spend: 50.0,
            sales: 150.0,
            orders: 2.0,
            clicks: 20,
            impressions: 2000,
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

    fn with_keywords(
        mut campaign: CampaignAggregate,
        entries: &[(&str, MatchType)],
    ) -> CampaignAggregate {
        for (text, match_type) in entries {
            campaign
                .keywords
                .entry(match_type.clone())
                .or_default()
                .insert(text.to_string());
        }
        campaign
    }

    #[test]
    fn auto_without_manual_sibling_is_auto_only() {
        let auto = aggregate("c1", "Widgets - Auto", Some(TargetingType::Auto));
        let context = AccountContext::build(std::slice::from_ref(&auto));

        let classifier = Classifier::new(ClassifierConfig::default());
        assert_eq!(classifier.classify(&auto, &context), Archetype::AutoOnly);
    }

    #[test]
    fn auto_with_manual_sibling_falls_through() {
        let auto = aggregate("c1", "Widgets - Auto", Some(TargetingType::Auto));
        let manual = aggregate("c2", "Widgets - Manual", Some(TargetingType::Manual));
        let context = AccountContext::build(&[auto.clone(), manual]);

        let classifier = Classifier::new(ClassifierConfig::default());
        // Zero negatives, so the sibling-backed auto campaign lands on F.
        assert_eq!(
            classifier.classify(&auto, &context),
            Archetype::NegativeUnprotected
        );
    }

    #[test]
    fn single_match_wins_over_negative_rules() {
        let mut campaign = with_keywords(
            aggregate("c1", "Widgets Exact", Some(TargetingType::Manual)),
            &[("widget pro", MatchType::Exact), ("widget set", MatchType::Exact)],
        );
        campaign.negative_keywords = 4;
        let context = AccountContext::default();

        let classifier = Classifier::new(ClassifierConfig::default());
        assert_eq!(
            classifier.classify(&campaign, &context),
            Archetype::SingleMatchManual
        );
    }

    #[test]
    fn mixed_match_types_classify_as_multi_match() {
        let campaign = with_keywords(
            aggregate("c1", "Widgets", Some(TargetingType::Manual)),
            &[("widget pro", MatchType::Exact), ("widget set", MatchType::Broad)],
        );
        let context = AccountContext::default();

        let classifier = Classifier::new(ClassifierConfig::default());
        assert_eq!(
            classifier.classify(&campaign, &context),
            Archetype::MultiMatchMixed
        );
    }

    #[test]
    fn product_targets_without_keywords_classify_as_pat() {
        let mut campaign = aggregate("c1", "Widgets PAT", Some(TargetingType::Manual));
        campaign.product_targets.insert("asin=\"B00TEST123\"".to_string());
        let context = AccountContext::default();

        let classifier = Classifier::new(ClassifierConfig::default());
        assert_eq!(
            classifier.classify(&campaign, &context),
            Archetype::ProductTargetingOnly
        );
    }

    #[test]
    fn negative_coverage_threshold_is_configurable() {
        let mut campaign = aggregate("c1", "Widgets", None);
        campaign
            .product_targets
            .extend((0..10).map(|i| format!("asin=\"B{i:09}\"")));
        campaign.negative_keywords = 2;
        let context = AccountContext::default();

        let lenient = Classifier::new(ClassifierConfig {
            negative_coverage_ratio: 0.2,
            ..ClassifierConfig::default()
        });
        assert_eq!(
            lenient.classify(&campaign, &context),
            Archetype::NegativeProtected
        );

        let strict = Classifier::new(ClassifierConfig {
            negative_coverage_ratio: 0.5,
            ..ClassifierConfig::default()
        });
        // 2/10 coverage misses the stricter bar; negatives exist, so rule F
        // does not apply either, and the spend keeps it out of Dormant.
        assert_eq!(strict.classify(&campaign, &context), Archetype::Unclassified);
    }

    #[test]
    fn placement_rule_catches_under_covered_campaigns() {
        let mut campaign = aggregate("c1", "Widgets", None);
        campaign
            .product_targets
            .extend((0..10).map(|i| format!("asin=\"B{i:09}\"")));
        campaign.negative_keywords = 1;
        campaign
            .adjusted_placements
            .insert("placement top".to_string());
        let context = AccountContext::default();

        let classifier = Classifier::new(ClassifierConfig::default());
        assert_eq!(
            classifier.classify(&campaign, &context),
            Archetype::PlacementOptimized
        );
    }

    #[test]
    fn dormant_and_fragmented_need_a_negative_to_be_reachable() {
        let mut campaign = aggregate("c1", "Widgets", None);
        campaign.spend = 0.0;
        campaign.clicks = 0;
        campaign.negative_keywords = 1;
        campaign
            .product_targets
            .extend((0..10).map(|i| format!("asin=\"B{i:09}\"")));
        let context = AccountContext::default();

        let classifier = Classifier::new(ClassifierConfig {
            negative_coverage_ratio: 0.5,
            ..ClassifierConfig::default()
        });
        assert_eq!(classifier.classify(&campaign, &context), Archetype::Dormant);

        campaign.spend = 25.0;
        campaign.clicks = 5;
        campaign
            .ad_groups
            .extend((0..20).map(|i| format!("ag{i}")));
        assert_eq!(
            classifier.classify(&campaign, &context),
            Archetype::Fragmented
        );
    }

    #[test]
    fn every_campaign_receives_exactly_one_label() {
        let campaigns = vec![
            aggregate("c1", "Widgets - Auto", Some(TargetingType::Auto)),
            with_keywords(
                aggregate("c2", "Widgets - Manual", Some(TargetingType::Manual)),
                &[("widget pro", MatchType::Exact)],
            ),
            aggregate("c3", "No Campaign Row", None),
        ];

        let classifier = Classifier::new(ClassifierConfig::default());
        let classified = classifier.classify_all(campaigns);

        assert_eq!(classified.len(), 3);
        let ids: BTreeSet<_> = classified
            .iter()
            .map(|campaign| campaign.aggregate.campaign_id.clone())
            .collect();
        assert_eq!(ids.len(), 3);
    }
}
