use super::{filled, require_number};
use crate::error::PortalResult;
use crate::gateway::ReportGateway;
use internhub_shared::validation::{ValidationResult, require, validate_progress_report};
use internhub_shared::{EntityId, NewProgressReport, ProgressReport, ReportStatus};

/// 学生周报
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressReportForm {
    pub assignment_id: EntityId,
    pub week: String,
    pub summary: String,
    pub hours_spent: String,
}

impl ProgressReportForm {
    pub fn new(assignment_id: impl Into<EntityId>) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            ..Default::default()
        }
    }

    /// 下一周的周次，基于已提交的周报
    pub fn next_week(reports: &[ProgressReport]) -> u32 {
        reports.iter().map(|r| r.week).max().unwrap_or(0) + 1
    }

    pub fn can_submit(&self) -> bool {
        filled(&[&self.week, &self.summary, &self.hours_spent])
    }

    pub fn to_request(&self) -> ValidationResult<NewProgressReport> {
        let report = NewProgressReport {
            assignment_id: self.assignment_id.clone(),
            week: require_number("week", "Week", &self.week)?,
            summary: self.summary.trim().to_string(),
            hours_spent: require_number("hoursSpent", "Hours", &self.hours_spent)?,
        };
        validate_progress_report(&report)?;
        Ok(report)
    }

    pub fn validate(&self) -> ValidationResult {
        self.to_request().map(|_| ())
    }

    pub async fn submit<G: ReportGateway + ?Sized>(
        &self,
        gateway: &G,
    ) -> PortalResult<ProgressReport> {
        let report = self.to_request()?;
        gateway.submit(report).await
    }
}

/// 教师审阅周报
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportReviewForm {
    pub report_id: EntityId,
    pub comment: String,
}

impl ReportReviewForm {
    /// 已审阅的周报返回 `None`
    pub fn for_report(report: &ProgressReport) -> Option<Self> {
        (report.status == ReportStatus::Submitted).then(|| Self {
            report_id: report.id.clone(),
            comment: String::new(),
        })
    }

    pub fn can_submit(&self) -> bool {
        !self.comment.trim().is_empty()
    }

    pub fn validate(&self) -> ValidationResult {
        require("facultyComment", "Comment", &self.comment).map(|_| ())
    }

    pub async fn submit<G: ReportGateway + ?Sized>(
        &self,
        gateway: &G,
    ) -> PortalResult<ProgressReport> {
        self.validate()?;
        gateway.review(&self.report_id, &self.comment).await
    }
}
