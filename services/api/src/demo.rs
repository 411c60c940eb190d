use crate::infra::build_auditor;
use clap::Args;
use sp_roaster::analysis::report::views::{AccountReportSummary, CampaignView};
use sp_roaster::error::AppError;
use std::io::Cursor;
use std::path::PathBuf;

/// Bundled bulk sheet used by the `demo` subcommand and the endpoint tests.
/// Five campaigns spread across the archetype table.
pub(crate) const SAMPLE_SHEET: &str = "\
Entity,Campaign Id,Campaign Name,Ad Group Id,Ad Id,ASIN,Keyword Text,Product Targeting Expression,Targeting Type,Match Type,State,Bid,Spend,Sales,Orders,Impressions,Clicks,Placement,Percentage
Campaign,C100,Kettle Pro - Auto,,,,,,Auto,,enabled,,120.00,310.00,9,41000,150,,
Bidding Adjustment,C100,,,,,,,,,enabled,,0,0,0,0,0,Placement Top,35
Negative Keyword,C100,,AG110,,,tea kettle spare parts,,,negativeExact,enabled,,0,0,0,0,0,,
Campaign,C200,Kettle Pro - Manual,,,,,,Manual,,enabled,,260.00,905.00,24,52000,240,,
Product Ad,C200,,AG210,AD211,B01KETTLE99,,,,,enabled,,0,0,0,0,0,,
Keyword,C200,,AG210,,,stainless kettle,,,Exact,enabled,1.10,0,0,0,0,0,,
Keyword,C200,,AG210,,,electric kettle 1.7l,,,Exact,enabled,0.95,0,0,0,0,0,,
Keyword,C200,,AG210,,,gooseneck kettle,,,Exact,enabled,1.25,0,0,0,0,0,,
Keyword,C200,,AG210,,,kettle for pour over,,,Exact,enabled,0.90,0,0,0,0,0,,
Keyword,C200,,AG210,,,kettle with thermometer,,,Exact,enabled,1.05,0,0,0,0,0,,
Negative Keyword,C200,,AG210,,,kettle repair,,,negativeExact,enabled,,0,0,0,0,0,,
Negative Keyword,C200,,AG210,,,kettle parts,,,negativePhrase,enabled,,0,0,0,0,0,,
Campaign,C300,Espresso Cups - Auto,,,,,,Auto,,enabled,,45.00,80.00,3,16000,60,,
Campaign,C400,Espresso Cups Mixed,,,,,,Manual,,enabled,,150.00,210.00,6,30000,140,,
Keyword,C400,,AG410,,,espresso cups,,,Broad,enabled,0.80,0,0,0,0,0,,
Keyword,C400,,AG410,,,espresso cup set,,,Exact,enabled,0.95,0,0,0,0,0,,
Campaign,C500,Travel Mug PAT,,,,,,Manual,,enabled,,75.00,240.00,7,21000,70,,
Product Targeting,C500,,AG510,,,,asin=\"B07TRAVLMUG\",,,enabled,0.60,0,0,0,0,0,,
";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Include the per-campaign listing in the demo output.
    #[arg(long)]
    pub(crate) list_campaigns: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AuditReportArgs {
    /// Path to the bulk sheet CSV to audit
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Emit the report as JSON instead of the rendered view
    #[arg(long)]
    pub(crate) json: bool,
    /// Include the per-campaign listing in the output
    #[arg(long)]
    pub(crate) list_campaigns: bool,
}

pub(crate) fn run_audit_report(args: AuditReportArgs) -> Result<(), AppError> {
    let AuditReportArgs {
        input,
        json,
        list_campaigns,
    } = args;

    let auditor = build_auditor()?;
    let report = auditor.audit_path(&input)?;

    let summary = report.summary();
    let campaigns = list_campaigns.then(|| report.campaign_details());

    if json {
        print_json(&summary, campaigns.as_deref())?;
    } else {
        render_report(&summary, campaigns.as_deref());
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Bulk sheet audit demo (bundled sample account)");

    let auditor = build_auditor()?;
    let report = auditor.audit_reader(Cursor::new(SAMPLE_SHEET))?;

    let summary = report.summary();
    let campaigns = args.list_campaigns.then(|| report.campaign_details());
    render_report(&summary, campaigns.as_deref());

    Ok(())
}

fn print_json(
    summary: &AccountReportSummary,
    campaigns: Option<&[CampaignView]>,
) -> Result<(), AppError> {
    let value = match campaigns {
        Some(campaigns) => {
            serde_json::json!({ "summary": summary, "campaigns": campaigns })
        }
        None => serde_json::json!({ "summary": summary }),
    };

    let rendered = serde_json::to_string_pretty(&value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn render_report(summary: &AccountReportSummary, campaigns: Option<&[CampaignView]>) {
    println!(
        "\nAccount health: {:.1} / 100 ({})",
        summary.overall.score, summary.overall.tier_label
    );
    println!(
        "Campaigns: {}  Spend: ${:.2}  Sales: ${:.2}  ACOS: {:.1}%  ROAS: {:.2}",
        summary.total_campaigns,
        summary.total_spend,
        summary.total_sales,
        summary.acos * 100.0,
        summary.roas
    );

    println!("\nPillars");
    for pillar in &summary.pillars {
        if pillar.applicable {
            println!(
                "  {:<20} {:>5.1} ({})",
                pillar.pillar_label, pillar.score, pillar.tier_label
            );
            for driver in pillar.drivers.iter().take(3) {
                println!("    - {}: {}", driver.campaign_name, driver.detail);
            }
        } else {
            println!("  {:<20}   n/a (no eligible campaigns)", pillar.pillar_label);
        }
    }

    println!("\nArchetype mix");
    for entry in &summary.archetype_distribution {
        println!(
            "  [{}] {:<24} {:>3} campaign(s)  ${:>9.2} spend  {}",
            entry.code,
            entry.label,
            entry.campaigns,
            entry.spend,
            entry.verdict.label()
        );
    }

    if let Some(campaigns) = campaigns {
        println!("\nCampaigns");
        for campaign in campaigns {
            println!(
                "  [{}] {:<30} spend ${:>9.2}  sales ${:>9.2}  ROAS {:>5.2}",
                campaign.archetype_code,
                campaign.campaign_name,
                campaign.spend,
                campaign.sales,
                campaign.roas
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_roaster::analysis::classify::Archetype;

    #[test]
    fn sample_sheet_audits_cleanly() {
        let auditor = build_auditor().expect("default configs are valid");
        let report = auditor
            .audit_reader(Cursor::new(SAMPLE_SHEET))
            .expect("sample sheet imports");

        assert_eq!(report.campaigns.len(), 5);

        let archetype = |id: &str| {
            report
                .campaigns
                .iter()
                .find(|campaign| campaign.aggregate.campaign_id == id)
                .map(|campaign| campaign.archetype)
                .expect("campaign present")
        };

        // The auto half of the Kettle Pro pair carries a placement boost.
        assert_eq!(archetype("C100"), Archetype::PlacementOptimized);
        assert_eq!(archetype("C200"), Archetype::SingleMatchManual);
        assert_eq!(archetype("C300"), Archetype::AutoOnly);
        assert_eq!(archetype("C400"), Archetype::MultiMatchMixed);
        assert_eq!(archetype("C500"), Archetype::ProductTargetingOnly);
    }

    #[test]
    fn sample_sheet_lands_in_the_ideal_automation_band() {
        let auditor = build_auditor().expect("default configs are valid");
        let report = auditor
            .audit_reader(Cursor::new(SAMPLE_SHEET))
            .expect("sample sheet imports");

        // 165 of 650 spend is Auto, about 25%.
        let summary = report.summary();
        assert_eq!(summary.pillars[1].score, 100.0);
    }
}
