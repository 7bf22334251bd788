//! 领域模型 (View Models)
//!
//! 所有实体的权威存储在后端，客户端只持有可刷新的临时副本。

use crate::role::{self, Role};
use crate::serde_helper;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type EntityId = String;

// =========================================================
// 身份 (Identity)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: EntityId,
    pub name: String,
    pub email: String,
    /// 未知或缺失的角色为 `None`，对应最受限的菜单
    #[serde(default, deserialize_with = "role::lenient")]
    pub role: Option<Role>,
    #[serde(
        default,
        deserialize_with = "serde_helper::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub department_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

// =========================================================
// 学年会话 (Academic Session)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSession {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: EntityId,
    pub academic_year: String,
    pub program: String,
    #[serde(default)]
    pub sub_program: Option<String>,
    pub batch: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub stipend: Option<f64>,
}

/// 创建/编辑会话的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub academic_year: String,
    pub program: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_program: Option<String>,
    pub batch: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stipend: Option<f64>,
}

// =========================================================
// 岗位 (Internship / Job Posting)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Approved,
    Rejected,
    Closed,
}

impl JobStatus {
    /// 单向状态流转：PENDING -> APPROVED/REJECTED，APPROVED -> CLOSED
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Pending, JobStatus::Approved)
                | (JobStatus::Pending, JobStatus::Rejected)
                | (JobStatus::Approved, JobStatus::Closed)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Approved => "Approved",
            JobStatus::Rejected => "Rejected",
            JobStatus::Closed => "Closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    #[default]
    Onsite,
    Remote,
    Hybrid,
}

impl LocationType {
    pub const ALL: [LocationType; 3] = [
        LocationType::Onsite,
        LocationType::Remote,
        LocationType::Hybrid,
    ];

    pub fn as_tag(&self) -> &'static str {
        match self {
            LocationType::Onsite => "ONSITE",
            LocationType::Remote => "REMOTE",
            LocationType::Hybrid => "HYBRID",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_tag() == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Internship {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: EntityId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "serde_helper::null_as_empty")]
    pub programs: Vec<String>,
    #[serde(default)]
    pub location_type: LocationType,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub stipend: Option<f64>,
    pub duration: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInternship {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub programs: Vec<String>,
    pub location_type: LocationType,
    pub is_paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stipend: Option<f64>,
    pub duration: String,
    /// 新岗位一律以 PENDING 提交
    pub status: JobStatus,
}

// =========================================================
// 申请 (Application)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[serde(alias = "APPLIED")]
    Pending,
    #[serde(alias = "SHORTLISTED")]
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// 审核动作只对 PENDING 状态可见
    pub fn is_reviewable(&self) -> bool {
        matches!(self, ApplicationStatus::Pending)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: EntityId,
    #[serde(deserialize_with = "serde_helper::id")]
    pub student_id: EntityId,
    #[serde(rename = "jobId", deserialize_with = "serde_helper::id")]
    pub job_id: EntityId,
    pub status: ApplicationStatus,
    #[serde(rename = "appliedAt")]
    pub applied_at: DateTime<Utc>,
    #[serde(rename = "studentName", default)]
    pub student_name: Option<String>,
    #[serde(rename = "jobTitle", default)]
    pub job_title: Option<String>,
    #[serde(rename = "rejectionReason", default)]
    pub rejection_reason: Option<String>,
}

// =========================================================
// 指导教师分配 (Guide Assignment)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuideStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl GuideStatus {
    pub fn can_transition_to(&self, next: GuideStatus) -> bool {
        matches!(
            (self, next),
            (GuideStatus::NotStarted, GuideStatus::InProgress)
                | (GuideStatus::InProgress, GuideStatus::Completed)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            GuideStatus::NotStarted => "Not started",
            GuideStatus::InProgress => "In progress",
            GuideStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub author: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideAssignment {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: EntityId,
    pub student_name: String,
    pub student_reg_no: String,
    pub internship_title: String,
    pub company_name: String,
    pub status: GuideStatus,
    #[serde(default)]
    pub guide: Option<String>,
    /// 只追加，不删除
    #[serde(default, deserialize_with = "serde_helper::null_as_empty")]
    pub feedback: Vec<Feedback>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyMember {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,
}

// =========================================================
// 结项 (Closure)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClosureStatus {
    PendingReview,
    Closed,
}

impl ClosureStatus {
    pub fn can_transition_to(&self, next: ClosureStatus) -> bool {
        matches!(
            (self, next),
            (ClosureStatus::PendingReview, ClosureStatus::Closed)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosureDocument {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// 1..=5
    pub rating: u8,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosureRecord {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: EntityId,
    pub student_name: String,
    pub internship_title: String,
    pub company_name: String,
    pub status: ClosureStatus,
    #[serde(default, deserialize_with = "serde_helper::null_as_empty")]
    pub documents: Vec<ClosureDocument>,
    #[serde(default)]
    pub evaluation: Option<Evaluation>,
}

impl ClosureRecord {
    /// 只有还能关闭且尚无评价的记录可以提交评价
    pub fn awaiting_evaluation(&self) -> bool {
        self.status.can_transition_to(ClosureStatus::Closed) && self.evaluation.is_none()
    }
}

// =========================================================
// 招聘方 (Recruiter)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn toggled(&self) -> Self {
        match self {
            AccountStatus::Active => AccountStatus::Inactive,
            AccountStatus::Inactive => AccountStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recruiter {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub company_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: AccountStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecruiter {
    pub name: String,
    pub email: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

// =========================================================
// 周报 (Weekly Progress Report)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Submitted,
    Reviewed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: EntityId,
    #[serde(deserialize_with = "serde_helper::id")]
    pub assignment_id: EntityId,
    pub student_name: String,
    pub week: u32,
    pub summary: String,
    pub hours_spent: u32,
    pub submitted_at: DateTime<Utc>,
    pub status: ReportStatus,
    #[serde(default)]
    pub faculty_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProgressReport {
    pub assignment_id: EntityId,
    pub week: u32,
    pub summary: String,
    pub hours_spent: u32,
}

// =========================================================
// 管理员用户 (Admin Users)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "role::lenient")]
    pub role: Option<Role>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_with_unknown_role_still_parses() {
        let json = r#"{"id": 3, "name": "Asha", "email": "asha@uni.edu", "role": "VISITOR"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "3");
        assert_eq!(user.role, None);
        assert_eq!(user.department_id, None);
    }

    #[test]
    fn test_job_status_transitions_are_one_way() {
        assert!(JobStatus::Pending.can_transition_to(JobStatus::Approved));
        assert!(JobStatus::Pending.can_transition_to(JobStatus::Rejected));
        assert!(JobStatus::Approved.can_transition_to(JobStatus::Closed));
        // 不允许撤销审批
        assert!(!JobStatus::Approved.can_transition_to(JobStatus::Pending));
        assert!(!JobStatus::Rejected.can_transition_to(JobStatus::Approved));
        assert!(!JobStatus::Closed.can_transition_to(JobStatus::Approved));
    }

    #[test]
    fn test_application_status_aliases() {
        let applied: ApplicationStatus = serde_json::from_str(r#""APPLIED""#).unwrap();
        assert_eq!(applied, ApplicationStatus::Pending);
        let shortlisted: ApplicationStatus = serde_json::from_str(r#""SHORTLISTED""#).unwrap();
        assert_eq!(shortlisted, ApplicationStatus::Approved);
        assert!(applied.is_reviewable());
        assert!(!shortlisted.is_reviewable());
    }

    #[test]
    fn test_application_wire_names() {
        let json = r#"{
            "id": 10, "student_id": 4, "jobId": 7,
            "status": "PENDING", "appliedAt": "2024-06-03T10:00:00Z"
        }"#;
        let app: Application = serde_json::from_str(json).unwrap();
        assert_eq!(app.job_id, "7");
        assert_eq!(app.student_id, "4");
        assert!(app.rejection_reason.is_none());
    }

    #[test]
    fn test_guide_and_closure_transitions() {
        assert!(GuideStatus::NotStarted.can_transition_to(GuideStatus::InProgress));
        assert!(!GuideStatus::Completed.can_transition_to(GuideStatus::InProgress));
        assert!(ClosureStatus::PendingReview.can_transition_to(ClosureStatus::Closed));
        assert!(!ClosureStatus::Closed.can_transition_to(ClosureStatus::Closed));
    }

    #[test]
    fn test_session_parses_camel_case() {
        let json = r#"{
            "id": "s1", "academicYear": "2024-2025", "program": "MCA",
            "batch": "2022-2025", "startDate": "2024-06-01", "endDate": "2024-12-01",
            "isActive": true
        }"#;
        let session: AcademicSession = serde_json::from_str(json).unwrap();
        assert!(session.is_active);
        assert!(session.end_date > session.start_date);
        assert!(session.sub_program.is_none());
    }
}
