//! 仪表盘聚合
//!
//! 纯函数 `(records) -> Stats`，不依赖界面即可单独测试。
//! 后端没有可靠的聚合接口，所有统计都在客户端对列表做归约。

use crate::model::*;
use chrono::{Duration, NaiveDate};

/// 百分比，保留一位小数；分母为 0 时返回 0
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    ((part as f64 / whole as f64) * 1000.0).round() / 10.0
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub closed: usize,
    pub paid: usize,
    /// 已决策岗位中通过的比例（CLOSED 也曾经通过）
    pub approval_rate: f64,
}

pub fn job_stats(jobs: &[Internship]) -> JobStats {
    let mut stats = JobStats {
        total: jobs.len(),
        ..Default::default()
    };
    for job in jobs {
        match job.status {
            JobStatus::Pending => stats.pending += 1,
            JobStatus::Approved => stats.approved += 1,
            JobStatus::Rejected => stats.rejected += 1,
            JobStatus::Closed => stats.closed += 1,
        }
        if job.is_paid {
            stats.paid += 1;
        }
    }
    let passed = stats.approved + stats.closed;
    stats.approval_rate = percentage(passed, passed + stats.rejected);
    stats
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub acceptance_rate: f64,
}

pub fn application_stats(applications: &[Application]) -> ApplicationStats {
    let mut stats = ApplicationStats {
        total: applications.len(),
        ..Default::default()
    };
    for app in applications {
        match app.status {
            ApplicationStatus::Pending => stats.pending += 1,
            ApplicationStatus::Approved => stats.approved += 1,
            ApplicationStatus::Rejected => stats.rejected += 1,
        }
    }
    stats.acceptance_rate = percentage(stats.approved, stats.approved + stats.rejected);
    stats
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub total: usize,
    pub active: usize,
    pub archived: usize,
}

pub fn session_stats(sessions: &[AcademicSession]) -> SessionStats {
    let active = sessions.iter().filter(|s| s.is_active).count();
    SessionStats {
        total: sessions.len(),
        active,
        archived: sessions.len() - active,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuideStats {
    pub total: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub unassigned: usize,
    pub completion_rate: f64,
}

pub fn guide_stats(assignments: &[GuideAssignment]) -> GuideStats {
    let mut stats = GuideStats {
        total: assignments.len(),
        ..Default::default()
    };
    for a in assignments {
        match a.status {
            GuideStatus::NotStarted => stats.not_started += 1,
            GuideStatus::InProgress => stats.in_progress += 1,
            GuideStatus::Completed => stats.completed += 1,
        }
        if a.guide.as_deref().is_none_or(|g| g.trim().is_empty()) {
            stats.unassigned += 1;
        }
    }
    stats.completion_rate = percentage(stats.completed, stats.total);
    stats
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClosureStats {
    pub total: usize,
    pub pending_review: usize,
    pub closed: usize,
    /// 无评价时为 `None`
    pub average_rating: Option<f64>,
}

pub fn closure_stats(closures: &[ClosureRecord]) -> ClosureStats {
    let pending_review = closures
        .iter()
        .filter(|c| c.status == ClosureStatus::PendingReview)
        .count();
    let ratings: Vec<u8> = closures
        .iter()
        .filter_map(|c| c.evaluation.as_ref().map(|e| e.rating))
        .collect();
    let average_rating = (!ratings.is_empty()).then(|| {
        let sum: u32 = ratings.iter().map(|&r| r as u32).sum();
        ((sum as f64 / ratings.len() as f64) * 10.0).round() / 10.0
    });
    ClosureStats {
        total: closures.len(),
        pending_review,
        closed: closures.len() - pending_review,
        average_rating,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecruiterStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

pub fn recruiter_stats(recruiters: &[Recruiter]) -> RecruiterStats {
    let active = recruiters
        .iter()
        .filter(|r| r.status == AccountStatus::Active)
        .count();
    RecruiterStats {
        total: recruiters.len(),
        active,
        inactive: recruiters.len() - active,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub total: usize,
    pub awaiting_review: usize,
    pub reviewed: usize,
    pub total_hours: u32,
}

pub fn report_stats(reports: &[ProgressReport]) -> ReportStats {
    let awaiting_review = reports
        .iter()
        .filter(|r| r.status == ReportStatus::Submitted)
        .count();
    ReportStats {
        total: reports.len(),
        awaiting_review,
        reviewed: reports.len() - awaiting_review,
        total_hours: reports.iter().map(|r| r.hours_spent).sum(),
    }
}

// =========================================================
// 趋势 (Trend)
// =========================================================

/// 周环比：本周 = [today-6, today]，上周 = [today-13, today-7]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trend {
    pub current: usize,
    pub previous: usize,
    /// 上周为 0 时无法计算，返回 `None`
    pub delta_pct: Option<f64>,
}

pub fn weekly_trend(dates: impl IntoIterator<Item = NaiveDate>, today: NaiveDate) -> Trend {
    let current_start = today - Duration::days(6);
    let previous_start = today - Duration::days(13);

    let mut trend = Trend::default();
    for d in dates {
        if d > today {
            continue;
        }
        if d >= current_start {
            trend.current += 1;
        } else if d >= previous_start {
            trend.previous += 1;
        }
    }
    if trend.previous > 0 {
        let delta = (trend.current as f64 - trend.previous as f64) / trend.previous as f64;
        trend.delta_pct = Some((delta * 1000.0).round() / 10.0);
    }
    trend
}

pub fn application_trend(applications: &[Application], today: NaiveDate) -> Trend {
    weekly_trend(applications.iter().map(|a| a.applied_at.date_naive()), today)
}

// =========================================================
// 动作列表 (Action Lists)
// =========================================================

/// 待审批岗位，最早提交的排在前面
pub fn pending_approvals(jobs: &[Internship]) -> Vec<&Internship> {
    let mut pending: Vec<&Internship> = jobs
        .iter()
        .filter(|j| j.status == JobStatus::Pending)
        .collect();
    pending.sort_by_key(|j| j.created_at);
    pending
}

pub fn reviewable_applications(applications: &[Application]) -> Vec<&Application> {
    applications
        .iter()
        .filter(|a| a.status.is_reviewable())
        .collect()
}

/// 学生可申请的岗位：已通过且尚未申请过
pub fn open_positions<'a>(jobs: &'a [Internship], mine: &[Application]) -> Vec<&'a Internship> {
    jobs.iter()
        .filter(|j| j.status == JobStatus::Approved)
        .filter(|j| !mine.iter().any(|a| a.job_id == j.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn job(id: &str, status: JobStatus, day: u32) -> Internship {
        Internship {
            id: id.to_string(),
            title: format!("Job {}", id),
            description: String::new(),
            department: None,
            programs: vec![],
            location_type: LocationType::Onsite,
            is_paid: id.ends_with('p'),
            stipend: None,
            duration: "3 months".to_string(),
            status,
            created_at: Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap(),
            company_name: None,
        }
    }

    fn app(id: &str, job_id: &str, status: ApplicationStatus, day: u32) -> Application {
        Application {
            id: id.to_string(),
            student_id: "s".to_string(),
            job_id: job_id.to_string(),
            status,
            applied_at: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
            student_name: None,
            job_title: None,
            rejection_reason: None,
        }
    }

    #[test]
    fn test_percentage_handles_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 2), 100.0);
    }

    #[test]
    fn test_job_stats() {
        let jobs = vec![
            job("1", JobStatus::Pending, 1),
            job("2p", JobStatus::Approved, 2),
            job("3", JobStatus::Rejected, 3),
            job("4p", JobStatus::Closed, 4),
        ];
        let stats = job_stats(&jobs);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.paid, 2);
        assert_eq!(stats.approval_rate, 66.7);
    }

    #[test]
    fn test_empty_inputs_give_zero_stats() {
        assert_eq!(job_stats(&[]), JobStats::default());
        assert_eq!(application_stats(&[]).acceptance_rate, 0.0);
        assert_eq!(closure_stats(&[]).average_rating, None);
    }

    #[test]
    fn test_pending_approvals_oldest_first_and_excludes_decided() {
        let jobs = vec![
            job("late", JobStatus::Pending, 9),
            job("done", JobStatus::Approved, 1),
            job("early", JobStatus::Pending, 2),
        ];
        let ids: Vec<&str> = pending_approvals(&jobs).iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, ["early", "late"]);
    }

    #[test]
    fn test_weekly_trend() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let apps = vec![
            app("a", "1", ApplicationStatus::Pending, 14),
            app("b", "1", ApplicationStatus::Pending, 10),
            app("c", "1", ApplicationStatus::Pending, 8),
            app("d", "1", ApplicationStatus::Pending, 7),
            app("e", "1", ApplicationStatus::Pending, 1),
        ];
        let trend = application_trend(&apps, today);
        assert_eq!(trend.current, 3);
        assert_eq!(trend.previous, 2);
        assert_eq!(trend.delta_pct, Some(50.0));
    }

    #[test]
    fn test_trend_without_previous_week() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let trend = weekly_trend([today], today);
        assert_eq!(trend.current, 1);
        assert_eq!(trend.delta_pct, None);
    }

    #[test]
    fn test_open_positions_excludes_applied() {
        let jobs = vec![
            job("1", JobStatus::Approved, 1),
            job("2", JobStatus::Approved, 2),
            job("3", JobStatus::Pending, 3),
        ];
        let mine = vec![app("a", "1", ApplicationStatus::Pending, 5)];
        let open: Vec<&str> = open_positions(&jobs, &mine).iter().map(|j| j.id.as_str()).collect();
        assert_eq!(open, ["2"]);
    }

    #[test]
    fn test_guide_stats_counts_unassigned() {
        let assignment = |status, guide: Option<&str>| GuideAssignment {
            id: "g".to_string(),
            student_name: "S".to_string(),
            student_reg_no: "R".to_string(),
            internship_title: "T".to_string(),
            company_name: "C".to_string(),
            status,
            guide: guide.map(str::to_string),
            feedback: vec![],
        };
        let stats = guide_stats(&[
            assignment(GuideStatus::NotStarted, None),
            assignment(GuideStatus::InProgress, Some("Dr. Rao")),
            assignment(GuideStatus::Completed, Some("Dr. Rao")),
            assignment(GuideStatus::NotStarted, Some("  ")),
        ]);
        assert_eq!(stats.unassigned, 2);
        assert_eq!(stats.completion_rate, 25.0);
    }
}
