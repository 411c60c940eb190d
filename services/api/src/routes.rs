use crate::infra::{build_auditor, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sp_roaster::analysis::classify::{Archetype, ArchetypeDefinition};
use sp_roaster::analysis::report::export;
use sp_roaster::analysis::report::views::{AccountReportSummary, CampaignView};
use sp_roaster::error::AppError;
use std::io::Cursor;

#[derive(Debug, Deserialize)]
pub(crate) struct AuditReportRequest {
    /// The bulk sheet, as CSV text.
    pub(crate) sheet_csv: String,
    #[serde(default)]
    pub(crate) include_campaigns: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AuditReportResponse {
    pub(crate) summary: AccountReportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) campaigns: Option<Vec<CampaignView>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuditExportRequest {
    pub(crate) sheet_csv: String,
}

pub(crate) fn router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/audit/report",
            axum::routing::post(audit_report_endpoint),
        )
        .route(
            "/api/v1/audit/export",
            axum::routing::post(audit_export_endpoint),
        )
        .route(
            "/api/v1/audit/archetypes",
            axum::routing::get(archetype_definitions_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn audit_report_endpoint(
    Json(payload): Json<AuditReportRequest>,
) -> Result<Json<AuditReportResponse>, AppError> {
    let AuditReportRequest {
        sheet_csv,
        include_campaigns,
    } = payload;

    let auditor = build_auditor()?;
    let report = auditor.audit_reader(Cursor::new(sheet_csv.into_bytes()))?;

    let campaigns = if include_campaigns {
        Some(report.campaign_details())
    } else {
        None
    };

    Ok(Json(AuditReportResponse {
        summary: report.summary(),
        campaigns,
    }))
}

pub(crate) async fn audit_export_endpoint(
    Json(payload): Json<AuditExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let auditor = build_auditor()?;
    let report = auditor.audit_reader(Cursor::new(payload.sheet_csv.into_bytes()))?;
    let csv = export::to_csv_string(&report)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"campaign_audit.csv\"",
            ),
        ],
        csv,
    ))
}

pub(crate) async fn archetype_definitions_endpoint() -> Json<Vec<ArchetypeDefinition>> {
    Json(Archetype::definitions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::SAMPLE_SHEET;
    use axum::Json;

    #[tokio::test]
    async fn audit_report_endpoint_returns_summary() {
        let request = AuditReportRequest {
            sheet_csv: SAMPLE_SHEET.to_string(),
            include_campaigns: false,
        };

        let Json(body) = audit_report_endpoint(Json(request))
            .await
            .expect("report builds");

        assert!(body.summary.total_campaigns > 0);
        assert_eq!(body.summary.pillars.len(), 4);
        assert!(body.campaigns.is_none());
        assert!(body.summary.overall.score <= 100.0);
        assert!(!body.summary.archetype_distribution.is_empty());
    }

    #[tokio::test]
    async fn audit_report_endpoint_can_include_campaigns() {
        let request = AuditReportRequest {
            sheet_csv: SAMPLE_SHEET.to_string(),
            include_campaigns: true,
        };

        let Json(body) = audit_report_endpoint(Json(request))
            .await
            .expect("report builds");

        let campaigns = body.campaigns.expect("campaigns returned");
        assert_eq!(campaigns.len(), body.summary.total_campaigns);
        assert!(campaigns
            .iter()
            .all(|campaign| ('A'..='J').contains(&campaign.archetype_code)));
    }

    #[tokio::test]
    async fn audit_report_endpoint_rejects_a_headerless_sheet() {
        let request = AuditReportRequest {
            sheet_csv: "not,a,bulk,sheet\n1,2,3,4\n".to_string(),
            include_campaigns: false,
        };

        let error = audit_report_endpoint(Json(request))
            .await
            .expect_err("missing columns should be rejected");
        assert!(matches!(error, AppError::Sheet(_)));
    }

    #[tokio::test]
    async fn audit_export_endpoint_produces_csv() {
        let request = AuditExportRequest {
            sheet_csv: SAMPLE_SHEET.to_string(),
        };

        let response = audit_export_endpoint(Json(request))
            .await
            .expect("export builds")
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/csv")
        );
    }

    #[tokio::test]
    async fn archetype_definitions_cover_all_ten_codes() {
        let Json(definitions) = archetype_definitions_endpoint().await;
        let codes: Vec<char> = definitions.iter().map(|entry| entry.code).collect();
        assert_eq!(codes, ('A'..='J').collect::<Vec<char>>());
    }
}
