use super::summary::AccountReport;
use std::io::Write;

/// Write the classified campaigns as CSV, one row per campaign, in the
/// column order of the download view.
pub fn write_csv<W: Write>(report: &AccountReport, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "Campaign Name",
        "Type",
        "Verdict",
        "Targeting",
        "Spend",
        "Sales",
        "ACOS",
        "ROAS",
        "Orders",
        "Clicks",
        "Impressions",
        "Keywords",
        "Product Targets",
        "Negatives",
        "Placement Adjustments",
        "Ad Groups",
        "Campaign Id",
    ])?;

    for campaign in report.campaign_details() {
        csv_writer.write_record([
            campaign.campaign_name.as_str(),
            &campaign.archetype_code.to_string(),
            campaign.verdict.label(),
            campaign
                .targeting_type
                .map(|targeting| targeting.label())
                .unwrap_or(""),
            &format!("{:.2}", campaign.spend),
            &format!("{:.2}", campaign.sales),
            &format!("{:.4}", campaign.acos),
            &format!("{:.4}", campaign.roas),
            &format!("{:.0}", campaign.orders),
            &campaign.clicks.to_string(),
            &campaign.impressions.to_string(),
            &campaign.keyword_count.to_string(),
            &campaign.product_target_count.to_string(),
            &campaign.negative_count.to_string(),
            &campaign.placement_adjustment_count.to_string(),
            &campaign.ad_group_count.to_string(),
            campaign.campaign_id.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Convenience for the HTTP export endpoint.
pub fn to_csv_string(report: &AccountReport) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_csv(report, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
