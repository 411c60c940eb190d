use super::SheetError;
use crate::analysis::domain::{Entity, EntityState, MatchType, RawRow, TargetingType};
use std::io::Read;

/// Columns that must be present before any row is normalized.
pub(crate) const REQUIRED_COLUMNS: &[&str] = &[
    "Entity",
    "Campaign Id",
    "Campaign Name",
    "Ad Group Id",
    "Targeting Type",
    "Match Type",
    "State",
    "Bid",
    "Spend",
    "Sales",
    "Impressions",
    "Clicks",
    "Placement",
    "Percentage",
];

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RawRow>, SheetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        // 1-based data row number, counting the header as line 1.
        let line = index as u64 + 2;
        if let Some(row) = columns.decode(&record, line)? {
            rows.push(row);
        }
    }

    Ok(rows)
}

struct ColumnMap {
    entity: usize,
    campaign_id: usize,
    campaign_name: usize,
    ad_group_id: usize,
    targeting_type: usize,
    match_type: usize,
    state: usize,
    bid: usize,
    spend: usize,
    sales: usize,
    impressions: usize,
    clicks: usize,
    placement: usize,
    percentage: usize,
    ad_id: Option<usize>,
    asin: Option<usize>,
    keyword_text: Option<usize>,
    product_targeting_expression: Option<usize>,
    orders: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, SheetError> {
        let require = |name: &'static str| {
            find_column(headers, name).ok_or(SheetError::MalformedInput { column: name })
        };

        Ok(Self {
            entity: require("Entity")?,
            campaign_id: require("Campaign Id")?,
            campaign_name: require("Campaign Name")?,
            ad_group_id: require("Ad Group Id")?,
            targeting_type: require("Targeting Type")?,
            match_type: require("Match Type")?,
            state: require("State")?,
            bid: require("Bid")?,
            spend: require("Spend")?,
            sales: require("Sales")?,
            impressions: require("Impressions")?,
            clicks: require("Clicks")?,
            placement: require("Placement")?,
            percentage: require("Percentage")?,
            ad_id: find_column(headers, "Ad Id"),
            asin: find_column(headers, "ASIN"),
            keyword_text: find_column(headers, "Keyword Text"),
            product_targeting_expression: find_column(headers, "Product Targeting Expression"),
            orders: find_column(headers, "Orders"),
        })
    }

    fn decode(
        &self,
        record: &csv::StringRecord,
        line: u64,
    ) -> Result<Option<RawRow>, SheetError> {
        let field = |index: usize| record.get(index).unwrap_or("");
        let optional = |index: Option<usize>| index.map(field).unwrap_or("");

        // Banner and totals rows in real exports carry no join key; keep every
        // row that has one, regardless of state.
        let campaign_id = field(self.campaign_id).trim();
        if campaign_id.is_empty() {
            return Ok(None);
        }

        let row = RawRow {
            entity: Entity::parse(field(self.entity)),
            campaign_id: campaign_id.to_string(),
            campaign_name: non_empty(field(self.campaign_name)),
            ad_group_id: non_empty(field(self.ad_group_id)),
            ad_id: non_empty(optional(self.ad_id)),
            asin: non_empty(optional(self.asin)),
            keyword_text: non_empty(optional(self.keyword_text)),
            product_targeting_expression: non_empty(
                optional(self.product_targeting_expression),
            ),
            targeting_type: TargetingType::parse(field(self.targeting_type)),
            match_type: MatchType::parse(field(self.match_type)),
            state: EntityState::parse(field(self.state)),
            bid: coerce_number(field(self.bid), line, "Bid")?,
            spend: coerce_number(field(self.spend), line, "Spend")?,
            sales: coerce_number(field(self.sales), line, "Sales")?,
            orders: coerce_number(optional(self.orders), line, "Orders")?,
            impressions: coerce_count(field(self.impressions), line, "Impressions")?,
            clicks: coerce_count(field(self.clicks), line, "Clicks")?,
            placement: non_empty(field(self.placement)),
            percentage: coerce_number(field(self.percentage), line, "Percentage")?,
        };

        Ok(Some(row))
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    let wanted = normalize_header(name);
    headers
        .iter()
        .position(|header| normalize_header(header) == wanted)
}

/// Header matching tolerates the console's "(Informational only)" suffixes
/// and casing differences ("Campaign ID" vs "Campaign Id").
fn normalize_header(header: &str) -> String {
    let lowered = header.replace('\u{feff}', "").to_ascii_lowercase();
    let stripped = lowered
        .trim()
        .trim_end_matches("(informational only)")
        .trim();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Numeric coercion: empty means zero, currency/percent decorations are
/// stripped, negatives clamp to zero. Anything else is an InvalidValue.
fn coerce_number(raw: &str, row: u64, column: &'static str) -> Result<f64, SheetError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let cleaned = trimmed
        .trim_start_matches('$')
        .trim_end_matches('%')
        .replace(',', "");

    match cleaned.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value.max(0.0)),
        _ => Err(SheetError::InvalidValue {
            row,
            column,
            value: trimmed.to_string(),
        }),
    }
}

fn coerce_count(raw: &str, row: u64, column: &'static str) -> Result<u64, SheetError> {
    Ok(coerce_number(raw, row, column)?.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_header_strips_informational_suffix() {
        assert_eq!(
            normalize_header("Campaign Name (Informational only)"),
            "campaign name"
        );
        assert_eq!(normalize_header("  Campaign ID "), "campaign id");
    }

    #[test]
    fn coerce_number_handles_decorated_values() {
        assert_eq!(coerce_number("$1,234.50", 2, "Spend").expect("parses"), 1234.5);
        assert_eq!(coerce_number("25%", 2, "Percentage").expect("parses"), 25.0);
        assert_eq!(coerce_number("", 2, "Sales").expect("parses"), 0.0);
        assert_eq!(coerce_number("-3", 2, "Clicks").expect("parses"), 0.0);
    }

    #[test]
    fn coerce_number_rejects_text() {
        let err = coerce_number("n/a", 7, "Spend").expect_err("rejects");
        match err {
            SheetError::InvalidValue { row, column, value } => {
                assert_eq!(row, 7);
                assert_eq!(column, "Spend");
                assert_eq!(value, "n/a");
            }
            other => panic!("expected invalid value, got {other:?}"),
        }
    }
}
