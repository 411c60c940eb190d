use serde::{Deserialize, Serialize};

/// Row kinds that appear in a Sponsored Products bulk sheet.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Entity {
    Campaign,
    AdGroup,
    ProductAd,
    Keyword,
    ProductTargeting,
    NegativeKeyword,
    NegativeProductTargeting,
    BiddingAdjustment,
    Other(String),
}

impl Entity {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "campaign" => Self::Campaign,
            "ad group" => Self::AdGroup,
            "product ad" => Self::ProductAd,
            "keyword" => Self::Keyword,
            "product targeting" => Self::ProductTargeting,
            "negative keyword" | "campaign negative keyword" => Self::NegativeKeyword,
            "negative product targeting" | "campaign negative product targeting" => {
                Self::NegativeProductTargeting
            }
            "bidding adjustment" => Self::BiddingAdjustment,
            _ => Self::Other(value.trim().to_string()),
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Self::NegativeKeyword | Self::NegativeProductTargeting)
    }
}

/// Campaign-level targeting mode, read from the campaign row only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetingType {
    Auto,
    Manual,
}

impl TargetingType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" | "automatic" => Some(Self::Auto),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Manual => "Manual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchType {
    Exact,
    Phrase,
    Broad,
    Other(String),
}

impl MatchType {
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(match trimmed.to_ascii_lowercase().as_str() {
            "exact" => Self::Exact,
            "phrase" => Self::Phrase,
            "broad" => Self::Broad,
            _ => Self::Other(trimmed.to_ascii_lowercase()),
        })
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Exact => "Exact",
            Self::Phrase => "Phrase",
            Self::Broad => "Broad",
            Self::Other(raw) => raw,
        }
    }
}

/// Entity state is preserved verbatim; the pipeline never filters on it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityState {
    Enabled,
    Paused,
    Archived,
    Other(String),
}

impl EntityState {
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(match trimmed.to_ascii_lowercase().as_str() {
            "enabled" => Self::Enabled,
            "paused" => Self::Paused,
            "archived" => Self::Archived,
            _ => Self::Other(trimmed.to_string()),
        })
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Enabled => "Enabled",
            Self::Paused => "Paused",
            Self::Archived => "Archived",
            Self::Other(raw) => raw,
        }
    }
}

/// One validated bulk-sheet line. Immutable once parsed; `campaign_id` is the
/// join key across entity types.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub entity: Entity,
    pub campaign_id: String,
    pub campaign_name: Option<String>,
    pub ad_group_id: Option<String>,
    pub ad_id: Option<String>,
    pub asin: Option<String>,
    pub keyword_text: Option<String>,
    pub product_targeting_expression: Option<String>,
    pub targeting_type: Option<TargetingType>,
    pub match_type: Option<MatchType>,
    pub state: Option<EntityState>,
    pub bid: f64,
    pub spend: f64,
    pub sales: f64,
    pub orders: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub placement: Option<String>,
    pub percentage: f64,
}
