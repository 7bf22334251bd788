//! 仪表盘组合器
//!
//! 每个角色在挂载时并发发出一组固定的请求，再在客户端对结果做纯函数归约。
//! 各请求互不依赖：某个请求失败只让对应的区块进入失败状态，其余区块照常显示。

use crate::error::PortalResult;
use crate::gateway::{
    ApplicationGateway, ClosureGateway, GuideGateway, JobGateway, PortalGateways,
    RecruiterGateway, ReportGateway, SessionGateway,
};
use chrono::NaiveDate;
use futures::join;
use internhub_shared::stats::{
    self, ApplicationStats, ClosureStats, GuideStats, JobStats, RecruiterStats, ReportStats,
    SessionStats, Trend,
};
use internhub_shared::{
    Application, ClosureRecord, Internship, ProgressReport, ReportStatus, Role,
};

/// 仪表盘区块：加载成功或失败（失败消息用于提示）
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Loaded(T),
    Failed(String),
}

impl<T> Section<T> {
    pub fn as_ref(&self) -> Section<&T> {
        match self {
            Section::Loaded(v) => Section::Loaded(v),
            Section::Failed(msg) => Section::Failed(msg.clone()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Section<U> {
        match self {
            Section::Loaded(v) => Section::Loaded(f(v)),
            Section::Failed(msg) => Section::Failed(msg),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Section::Loaded(v) => Some(v),
            Section::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Section::Loaded(_) => None,
            Section::Failed(msg) => Some(msg),
        }
    }
}

impl<T> From<PortalResult<T>> for Section<T> {
    fn from(result: PortalResult<T>) -> Self {
        match result {
            Ok(v) => Section::Loaded(v),
            Err(e) => Section::Failed(e.message().to_string()),
        }
    }
}

fn owned<T: Clone>(items: Vec<&T>) -> Vec<T> {
    items.into_iter().cloned().collect()
}

// =========================================================
// 各角色的仪表盘
// =========================================================

/// IC 与 Placement：全局视角
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorDashboard {
    pub jobs: Section<JobStats>,
    pub pending_jobs: Section<Vec<Internship>>,
    pub applications: Section<ApplicationStats>,
    pub trend: Section<Trend>,
    pub sessions: Section<SessionStats>,
    pub recruiters: Section<RecruiterStats>,
}

/// HOD：审批 + 本系学生指导情况
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentDashboard {
    pub jobs: Section<JobStats>,
    pub pending_jobs: Section<Vec<Internship>>,
    pub applications: Section<ApplicationStats>,
    pub guides: Section<GuideStats>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgrammeDashboard {
    pub sessions: Section<SessionStats>,
    pub guides: Section<GuideStats>,
    pub closures: Section<ClosureStats>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacultyDashboard {
    pub students: Section<GuideStats>,
    pub reports: Section<ReportStats>,
    pub reports_to_review: Section<Vec<ProgressReport>>,
    pub closures: Section<ClosureStats>,
    pub awaiting_evaluation: Section<Vec<ClosureRecord>>,
}

/// Recruiter 与 Corporate
#[derive(Debug, Clone, PartialEq)]
pub struct EmployerDashboard {
    pub jobs: Section<JobStats>,
    pub applications: Section<ApplicationStats>,
    pub trend: Section<Trend>,
    pub to_review: Section<Vec<Application>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentDashboard {
    pub open_positions: Section<Vec<Internship>>,
    pub applications: Section<ApplicationStats>,
    pub reports: Section<ReportStats>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardData {
    Coordinator(CoordinatorDashboard),
    Department(DepartmentDashboard),
    Programme(ProgrammeDashboard),
    Faculty(FacultyDashboard),
    Employer(EmployerDashboard),
    Student(StudentDashboard),
}

/// **核心方法：按角色并发拉取并归约**
pub async fn compose<G: PortalGateways>(role: Role, api: &G, today: NaiveDate) -> DashboardData {
    match role {
        Role::InternshipCoordinator | Role::Placement => {
            let (jobs, applications, sessions, recruiters) = join!(
                JobGateway::get_all(api),
                ApplicationGateway::get_all(api),
                SessionGateway::get_all(api),
                RecruiterGateway::get_all(api),
            );
            let jobs = Section::from(jobs);
            let applications = Section::from(applications);
            DashboardData::Coordinator(CoordinatorDashboard {
                jobs: jobs.as_ref().map(|j| stats::job_stats(j)),
                pending_jobs: jobs.as_ref().map(|j| owned(stats::pending_approvals(j))),
                applications: applications.as_ref().map(|a| stats::application_stats(a)),
                trend: applications.map(|a| stats::application_trend(&a, today)),
                sessions: Section::from(sessions).map(|s| stats::session_stats(&s)),
                recruiters: Section::from(recruiters).map(|r| stats::recruiter_stats(&r)),
            })
        }
        Role::HeadOfDepartment => {
            let (jobs, applications, guides) = join!(
                JobGateway::get_all(api),
                ApplicationGateway::get_all(api),
                GuideGateway::get_all(api),
            );
            let jobs = Section::from(jobs);
            DashboardData::Department(DepartmentDashboard {
                jobs: jobs.as_ref().map(|j| stats::job_stats(j)),
                pending_jobs: jobs.map(|j| owned(stats::pending_approvals(&j))),
                applications: Section::from(applications).map(|a| stats::application_stats(&a)),
                guides: Section::from(guides).map(|g| stats::guide_stats(&g)),
            })
        }
        Role::ProgrammeCoordinator => {
            let (sessions, guides, closures) = join!(
                SessionGateway::get_all(api),
                GuideGateway::get_all(api),
                ClosureGateway::get_all(api),
            );
            DashboardData::Programme(ProgrammeDashboard {
                sessions: Section::from(sessions).map(|s| stats::session_stats(&s)),
                guides: Section::from(guides).map(|g| stats::guide_stats(&g)),
                closures: Section::from(closures).map(|c| stats::closure_stats(&c)),
            })
        }
        Role::Faculty => {
            let (guides, reports, closures) = join!(
                GuideGateway::get_all(api),
                ReportGateway::get_all(api),
                ClosureGateway::get_all(api),
            );
            let reports = Section::from(reports);
            let closures = Section::from(closures);
            DashboardData::Faculty(FacultyDashboard {
                students: Section::from(guides).map(|g| stats::guide_stats(&g)),
                reports: reports.as_ref().map(|r| stats::report_stats(r)),
                reports_to_review: reports.map(|r| {
                    r.into_iter()
                        .filter(|r| r.status == ReportStatus::Submitted)
                        .collect()
                }),
                closures: closures.as_ref().map(|c| stats::closure_stats(c)),
                awaiting_evaluation: closures
                    .map(|c| c.into_iter().filter(|c| c.awaiting_evaluation()).collect()),
            })
        }
        Role::Recruiter | Role::Corporate => {
            let (jobs, applications) =
                join!(JobGateway::get_all(api), ApplicationGateway::get_all(api));
            let applications = Section::from(applications);
            DashboardData::Employer(EmployerDashboard {
                jobs: Section::from(jobs).map(|j| stats::job_stats(&j)),
                applications: applications.as_ref().map(|a| stats::application_stats(a)),
                trend: applications
                    .as_ref()
                    .map(|a| stats::application_trend(a, today)),
                to_review: applications.map(|a| owned(stats::reviewable_applications(&a))),
            })
        }
        Role::Student => {
            let (jobs, applications, reports) = join!(
                JobGateway::get_all(api),
                ApplicationGateway::get_all(api),
                ReportGateway::get_all(api),
            );
            let applications = Section::from(applications);
            // 申请列表失败时仍展示全部已通过岗位
            let mine: &[Application] = applications.loaded().map(Vec::as_slice).unwrap_or(&[]);
            DashboardData::Student(StudentDashboard {
                open_positions: Section::from(jobs)
                    .map(|j| owned(stats::open_positions(&j, mine))),
                applications: applications.as_ref().map(|a| stats::application_stats(a)),
                reports: Section::from(reports).map(|r| stats::report_stats(&r)),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{api, url};
    use internhub_shared::protocol::HttpMethod;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
    }

    fn jobs_json() -> serde_json::Value {
        let job = |id: u32, status: &str, created: &str| {
            json!({
                "id": id, "title": format!("Job {}", id), "description": "",
                "programs": ["MCA"], "location_type": "ONSITE", "is_paid": false,
                "duration": "3 months", "status": status, "created_at": created
            })
        };
        json!([
            job(1, "PENDING", "2024-06-10T09:00:00Z"),
            job(2, "APPROVED", "2024-06-01T09:00:00Z"),
            job(3, "PENDING", "2024-06-02T09:00:00Z"),
            job(4, "REJECTED", "2024-06-03T09:00:00Z"),
        ])
    }

    fn applications_json() -> serde_json::Value {
        let app = |id: u32, job: u32, status: &str, day: &str| {
            json!({"id": id, "student_id": 9, "jobId": job, "status": status,
                   "appliedAt": format!("2024-06-{}T10:00:00Z", day)})
        };
        json!([
            app(1, 2, "PENDING", "13"),
            app(2, 2, "APPROVED", "12"),
            app(3, 2, "REJECTED", "05"),
        ])
    }

    #[tokio::test]
    async fn test_coordinator_dashboard_aggregates_all_sections() {
        let api = api();
        let http = api.http_client();
        http.mock_response(HttpMethod::Get, &url("/internships"), 200, jobs_json());
        http.mock_response(HttpMethod::Get, &url("/applications"), 200, applications_json());
        http.mock_response(HttpMethod::Get, &url("/sessions"), 200, json!([]));
        http.mock_response(HttpMethod::Get, &url("/recruiters"), 200, json!([]));

        let DashboardData::Coordinator(d) =
            compose(Role::InternshipCoordinator, &api, today()).await
        else {
            panic!("expected coordinator dashboard");
        };

        let jobs = d.jobs.loaded().unwrap();
        assert_eq!(jobs.pending, 2);
        let pending_ids: Vec<_> = d
            .pending_jobs
            .loaded()
            .unwrap()
            .iter()
            .map(|j| j.id.as_str())
            .collect();
        assert_eq!(pending_ids, ["3", "1"]);
        assert_eq!(d.applications.loaded().unwrap().total, 3);
        let trend = d.trend.loaded().unwrap();
        assert_eq!((trend.current, trend.previous), (2, 1));
        assert_eq!(d.sessions.loaded().unwrap().total, 0);
        assert_eq!(http.request_count(), 4);
    }

    #[tokio::test]
    async fn test_failed_fetch_only_fails_its_sections() {
        let api = api();
        let http = api.http_client();
        http.mock_response(HttpMethod::Get, &url("/internships"), 200, jobs_json());
        http.mock_response(
            HttpMethod::Get,
            &url("/applications"),
            500,
            json!({"message": "Database unavailable"}),
        );

        let DashboardData::Employer(d) = compose(Role::Recruiter, &api, today()).await else {
            panic!("expected employer dashboard");
        };

        assert_eq!(d.jobs.loaded().unwrap().total, 4);
        assert_eq!(d.applications.error(), Some("Database unavailable"));
        assert!(d.trend.error().is_some());
        assert!(d.to_review.error().is_some());
    }

    #[tokio::test]
    async fn test_student_sees_unapplied_open_positions() {
        let api = api();
        let http = api.http_client();
        let mut jobs = jobs_json();
        jobs.as_array_mut().unwrap().push(json!({
            "id": 5, "title": "Job 5", "description": "", "programs": null,
            "duration": "2 months", "status": "APPROVED", "created_at": "2024-06-04T09:00:00Z"
        }));
        http.mock_response(HttpMethod::Get, &url("/internships"), 200, jobs);
        http.mock_response(HttpMethod::Get, &url("/applications"), 200, applications_json());
        http.mock_response(HttpMethod::Get, &url("/reports"), 200, json!([]));

        let DashboardData::Student(d) = compose(Role::Student, &api, today()).await else {
            panic!("expected student dashboard");
        };
        let open: Vec<_> = d
            .open_positions
            .loaded()
            .unwrap()
            .iter()
            .map(|j| j.id.as_str())
            .collect();
        assert_eq!(open, ["5"]);
        assert_eq!(d.reports.loaded().unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_faculty_lists_pending_work() {
        let api = api();
        let http = api.http_client();
        http.mock_response(HttpMethod::Get, &url("/faculty/assignments"), 200, json!([]));
        http.mock_response(
            HttpMethod::Get,
            &url("/reports"),
            200,
            json!([
                {"id": 1, "assignmentId": 1, "studentName": "A", "week": 1, "summary": "s",
                 "hoursSpent": 10, "submittedAt": "2024-06-10T10:00:00Z", "status": "SUBMITTED"},
                {"id": 2, "assignmentId": 1, "studentName": "A", "week": 2, "summary": "s",
                 "hoursSpent": 12, "submittedAt": "2024-06-12T10:00:00Z", "status": "REVIEWED"}
            ]),
        );
        http.mock_response(
            HttpMethod::Get,
            &url("/closures"),
            200,
            json!([
                {"id": "c1", "studentName": "A", "internshipTitle": "T", "companyName": "C",
                 "status": "PENDING_REVIEW", "documents": []},
                {"id": "c2", "studentName": "B", "internshipTitle": "T", "companyName": "C",
                 "status": "CLOSED", "evaluation": {"rating": 4, "remarks": "Good"}}
            ]),
        );

        let DashboardData::Faculty(d) = compose(Role::Faculty, &api, today()).await else {
            panic!("expected faculty dashboard");
        };
        assert_eq!(d.reports.loaded().unwrap().total_hours, 22);
        assert_eq!(d.reports_to_review.loaded().unwrap().len(), 1);
        assert_eq!(d.awaiting_evaluation.loaded().unwrap()[0].id, "c1");
        assert_eq!(d.closures.loaded().unwrap().average_rating, Some(4.0));
    }
}
