use crate::api::ApiClient;
use crate::error::PortalResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use internhub_shared::protocol::{ListReports, ReviewReport, SubmitReport};
use internhub_shared::validation::{require, validate_progress_report};
use internhub_shared::{NewProgressReport, ProgressReport};

#[async_trait(?Send)]
pub trait ReportGateway {
    async fn get_all(&self) -> PortalResult<Vec<ProgressReport>>;
    async fn submit(&self, report: NewProgressReport) -> PortalResult<ProgressReport>;
    /// SUBMITTED -> REVIEWED
    async fn review(&self, id: &str, comment: &str) -> PortalResult<ProgressReport>;
}

#[async_trait(?Send)]
impl<C: HttpClient> ReportGateway for ApiClient<C> {
    async fn get_all(&self) -> PortalResult<Vec<ProgressReport>> {
        self.call(ListReports)
            .await
            .map_err(|e| e.in_op("reports.get_all"))
    }

    async fn submit(&self, report: NewProgressReport) -> PortalResult<ProgressReport> {
        validate_progress_report(&report)?;
        self.call(SubmitReport(report))
            .await
            .map_err(|e| e.in_op("reports.submit"))
    }

    async fn review(&self, id: &str, comment: &str) -> PortalResult<ProgressReport> {
        let comment = require("facultyComment", "Comment", comment)?;
        self.call(ReviewReport {
            id: id.to_string(),
            comment,
        })
        .await
        .map_err(|e| e.in_op_with("reports.review", id))
    }
}
