use super::config::ScoringConfig;
use super::{Pillar, PillarScore, ScoreDriver};
use crate::analysis::classify::{Archetype, ClassifiedCampaign};
use crate::analysis::domain::TargetingType;
use std::cmp::Ordering;

const MAX_DRIVERS: usize = 5;

const WELL_ORGANIZED: &[Archetype] = &[
    Archetype::SingleMatchManual,
    Archetype::ProductTargetingOnly,
    Archetype::PlacementOptimized,
];

const INEFFICIENT: &[Archetype] = &[
    Archetype::Fragmented,
    Archetype::Unclassified,
    Archetype::MultiMatchMixed,
];

/// Spend share of well-organized archetypes over the combined spend of
/// well-organized plus inefficient ones. Archetypes in neither group are
/// neutral. No spend in either group means the pillar is not applicable.
pub(crate) fn structure(
    campaigns: &[ClassifiedCampaign],
    config: &ScoringConfig,
) -> PillarScore {
    let good_spend: f64 = spend_of(campaigns, WELL_ORGANIZED);
    let bad_spend: f64 = spend_of(campaigns, INEFFICIENT);
    let graded = good_spend + bad_spend;

    if graded <= 0.0 {
        return PillarScore::neutral(Pillar::Structure, &config.breakpoints);
    }

    let drivers = top_drivers(
        campaigns
            .iter()
            .filter(|campaign| INEFFICIENT.contains(&campaign.archetype))
            .filter(|campaign| campaign.aggregate.spend > 0.0)
            .map(|campaign| ScoreDriver {
                campaign_id: campaign.aggregate.campaign_id.clone(),
                campaign_name: campaign.aggregate.campaign_name.clone(),
                detail: format!("{} spend", campaign.archetype.label()),
                value: campaign.aggregate.spend,
            }),
    );

    PillarScore::applicable(
        Pillar::Structure,
        good_spend / graded * 100.0,
        &config.breakpoints,
        drivers,
    )
}

/// Closeness of the Auto spend share to the configured band. Both extremes
/// are penalized; a 100% Auto account scores zero.
pub(crate) fn automation_balance(
    campaigns: &[ClassifiedCampaign],
    config: &ScoringConfig,
) -> PillarScore {
    let total_spend: f64 = campaigns.iter().map(|c| c.aggregate.spend).sum();
    if total_spend <= 0.0 {
        return PillarScore::neutral(Pillar::AutomationBalance, &config.breakpoints);
    }

    let auto_spend: f64 = campaigns
        .iter()
        .filter(|c| c.aggregate.targeting_type == Some(TargetingType::Auto))
        .map(|c| c.aggregate.spend)
        .sum();
    let auto_share_pct = auto_spend / total_spend * 100.0;

    let band = &config.automation_band;
    let score = if auto_share_pct >= band.ideal_min_pct && auto_share_pct <= band.ideal_max_pct {
        100.0
    } else if auto_share_pct < band.ideal_min_pct || auto_share_pct <= band.tolerable_max_pct {
        50.0
    } else {
        0.0
    };

    let drivers = top_drivers(
        campaigns
            .iter()
            .filter(|c| c.aggregate.targeting_type == Some(TargetingType::Auto))
            .filter(|c| c.aggregate.spend > 0.0)
            .map(|c| ScoreDriver {
                campaign_id: c.aggregate.campaign_id.clone(),
                campaign_name: c.aggregate.campaign_name.clone(),
                detail: format!("auto spend ({auto_share_pct:.1}% of account)"),
                value: c.aggregate.spend,
            }),
    );

    PillarScore::applicable(
        Pillar::AutomationBalance,
        score,
        &config.breakpoints,
        drivers,
    )
}

/// Spend-weighted mean negative coverage (negatives per target, capped at
/// 1.0) over Manual campaigns with meaningful spend and at least one target.
/// Campaigns without targets are ineligible, not an error.
pub(crate) fn funneling(campaigns: &[ClassifiedCampaign], config: &ScoringConfig) -> PillarScore {
    let eligible: Vec<&ClassifiedCampaign> = campaigns
        .iter()
        .filter(|c| c.aggregate.targeting_type == Some(TargetingType::Manual))
        .filter(|c| c.aggregate.spend >= config.min_campaign_spend)
        .filter(|c| c.aggregate.target_count() > 0)
        .collect();

    let weighted_spend: f64 = eligible.iter().map(|c| c.aggregate.spend).sum();
    if eligible.is_empty() || weighted_spend <= 0.0 {
        return PillarScore::neutral(Pillar::Funneling, &config.breakpoints);
    }

    let coverage = |campaign: &ClassifiedCampaign| -> f64 {
        (campaign.aggregate.negative_count() as f64 / campaign.aggregate.target_count() as f64)
            .min(1.0)
    };

    let weighted_coverage: f64 = eligible
        .iter()
        .map(|c| coverage(c) * c.aggregate.spend)
        .sum();

    // Surface the least-covered campaigns first; they drag the score.
    let mut drivers: Vec<ScoreDriver> = eligible
        .iter()
        .map(|c| ScoreDriver {
            campaign_id: c.aggregate.campaign_id.clone(),
            campaign_name: c.aggregate.campaign_name.clone(),
            detail: format!(
                "{} negatives over {} targets",
                c.aggregate.negative_count(),
                c.aggregate.target_count()
            ),
            value: coverage(c) * 100.0,
        })
        .collect();
    drivers.sort_by(|a, b| {
        a.value
            .partial_cmp(&b.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.campaign_id.cmp(&b.campaign_id))
    });
    drivers.truncate(MAX_DRIVERS);

    PillarScore::applicable(
        Pillar::Funneling,
        weighted_coverage / weighted_spend * 100.0,
        &config.breakpoints,
        drivers,
    )
}

/// Share of spend-significant campaigns carrying at least one non-zero
/// placement bid adjustment.
pub(crate) fn bid_adjustments(
    campaigns: &[ClassifiedCampaign],
    config: &ScoringConfig,
) -> PillarScore {
    let eligible: Vec<&ClassifiedCampaign> = campaigns
        .iter()
        .filter(|c| c.aggregate.spend >= config.min_campaign_spend)
        .collect();

    if eligible.is_empty() {
        return PillarScore::neutral(Pillar::BidAdjustments, &config.breakpoints);
    }

    let adopted = eligible
        .iter()
        .filter(|c| c.aggregate.placement_adjustment_count() >= 1)
        .count();

    let drivers = top_drivers(
        eligible
            .iter()
            .filter(|c| c.aggregate.placement_adjustment_count() == 0)
            .map(|c| ScoreDriver {
                campaign_id: c.aggregate.campaign_id.clone(),
                campaign_name: c.aggregate.campaign_name.clone(),
                detail: "no placement adjustments".to_string(),
                value: c.aggregate.spend,
            }),
    );

    PillarScore::applicable(
        Pillar::BidAdjustments,
        adopted as f64 / eligible.len() as f64 * 100.0,
        &config.breakpoints,
        drivers,
    )
}

fn spend_of(campaigns: &[ClassifiedCampaign], archetypes: &[Archetype]) -> f64 {
    campaigns
        .iter()
        .filter(|campaign| archetypes.contains(&campaign.archetype))
        .map(|campaign| campaign.aggregate.spend)
        .sum()
}

/// Highest-value drivers first, capped, with a deterministic tie-break.
fn top_drivers<I: Iterator<Item = ScoreDriver>>(drivers: I) -> Vec<ScoreDriver> {
    let mut drivers: Vec<ScoreDriver> = drivers.collect();
    drivers.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.campaign_id.cmp(&b.campaign_id))
    });
    drivers.truncate(MAX_DRIVERS);
    drivers
}
