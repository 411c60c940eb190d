use super::config::ClassifierConfig;
use super::{AccountContext, Archetype};
use crate::analysis::aggregate::CampaignAggregate;
use crate::analysis::domain::TargetingType;

pub(crate) struct ArchetypeRule {
    pub(crate) archetype: Archetype,
    pub(crate) matches: fn(&CampaignAggregate, &AccountContext, &ClassifierConfig) -> bool,
}

/// The decision list, evaluated top to bottom; the first matching rule wins
/// and [`Archetype::Unclassified`] is the total fallback. Several predicates
/// overlap, so this ordering is part of the contract, not an implementation
/// detail.
pub(crate) const RULES: &[ArchetypeRule] = &[
    ArchetypeRule {
        archetype: Archetype::AutoOnly,
        matches: |campaign, context, _| {
            campaign.targeting_type == Some(TargetingType::Auto)
                && !context.has_manual_sibling(&campaign.campaign_name)
        },
    },
    ArchetypeRule {
        archetype: Archetype::SingleMatchManual,
        matches: |campaign, _, _| {
            campaign.targeting_type == Some(TargetingType::Manual)
                && campaign.keyword_count() >= 1
                && campaign.match_type_count() == 1
        },
    },
    ArchetypeRule {
        archetype: Archetype::MultiMatchMixed,
        matches: |campaign, _, _| {
            campaign.targeting_type == Some(TargetingType::Manual)
                && campaign.match_type_count() >= 2
        },
    },
    ArchetypeRule {
        archetype: Archetype::ProductTargetingOnly,
        matches: |campaign, _, _| {
            campaign.targeting_type == Some(TargetingType::Manual)
                && campaign.keyword_count() == 0
                && campaign.product_target_count() >= 1
        },
    },
    ArchetypeRule {
        archetype: Archetype::NegativeProtected,
        // Coverage is undefined without targets; target-less campaigns fall
        // through to the later rules.
        matches: |campaign, _, config| {
            campaign.target_count() > 0
                && campaign.negative_count() as f64
                    >= config.negative_coverage_ratio * campaign.target_count() as f64
                && campaign.negative_count() > 0
        },
    },
    ArchetypeRule {
        archetype: Archetype::NegativeUnprotected,
        matches: |campaign, _, _| campaign.negative_count() == 0,
    },
    ArchetypeRule {
        archetype: Archetype::PlacementOptimized,
        matches: |campaign, _, _| campaign.placement_adjustment_count() >= 1,
    },
    ArchetypeRule {
        archetype: Archetype::Dormant,
        matches: |campaign, _, _| campaign.clicks == 0 && campaign.spend == 0.0,
    },
    ArchetypeRule {
        archetype: Archetype::Fragmented,
        matches: |campaign, _, config| {
            campaign.ad_group_count() as f64
                > config.fragmentation_ratio * campaign.target_count() as f64
        },
    },
];
