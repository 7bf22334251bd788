use crate::auth::use_auth;
use crate::components::common::{ErrorBanner, Loading, PageHeader, StatCard, spawn_tracked, use_view_scope};
use crate::dashboard::{
    CoordinatorDashboard, DashboardData, DepartmentDashboard, EmployerDashboard, FacultyDashboard,
    ProgrammeDashboard, Section, StudentDashboard, compose,
};
use internhub_shared::Role;
use internhub_shared::stats::{
    ApplicationStats, ClosureStats, GuideStats, JobStats, RecruiterStats, ReportStats,
    SessionStats, Trend,
};
use leptos::prelude::*;
use leptos_router::components::A;

fn pct(value: f64) -> String {
    format!("{:.1}%", value)
}

fn trend_hint(trend: &Trend) -> String {
    match trend.delta_pct {
        Some(delta) if delta >= 0.0 => format!("+{:.1}% vs last week", delta),
        Some(delta) => format!("{:.1}% vs last week", delta),
        None => format!("{} last week", trend.previous),
    }
}

/// 区块失败时显示错误，其余区块不受影响
fn section<T>(section: &Section<T>, render: impl FnOnce(&T) -> AnyView) -> AnyView {
    match section {
        Section::Loaded(value) => render(value),
        Section::Failed(msg) => view! { <ErrorBanner message=msg.clone() /> }.into_any(),
    }
}

fn stat(title: &str, value: impl ToString, hint: impl Into<String>) -> AnyView {
    view! { <StatCard title=title.to_string() value=value.to_string() hint=hint.into() /> }
        .into_any()
}

fn job_cards(stats: &JobStats) -> AnyView {
    view! {
        <div class="stats stats-vertical lg:stats-horizontal shadow w-full">
            {stat("Internships", stats.total, format!("{} paid", stats.paid))}
            {stat("Pending approval", stats.pending, "")}
            {stat("Approved", stats.approved, format!("{} closed", stats.closed))}
            {stat("Approval rate", pct(stats.approval_rate), format!("{} rejected", stats.rejected))}
        </div>
    }
    .into_any()
}

fn application_cards(stats: &ApplicationStats) -> AnyView {
    view! {
        <div class="stats stats-vertical lg:stats-horizontal shadow w-full">
            {stat("Applications", stats.total, "")}
            {stat("Awaiting review", stats.pending, "")}
            {stat("Acceptance rate", pct(stats.acceptance_rate), format!("{} approved", stats.approved))}
        </div>
    }
    .into_any()
}

fn trend_card(trend: &Trend) -> AnyView {
    view! {
        <div class="stats shadow w-full">
            {stat("Applications this week", trend.current, trend_hint(trend))}
        </div>
    }
    .into_any()
}

fn session_cards(stats: &SessionStats) -> AnyView {
    view! {
        <div class="stats shadow w-full">
            {stat("Academic sessions", stats.total, format!("{} archived", stats.archived))}
            {stat("Active sessions", stats.active, "")}
        </div>
    }
    .into_any()
}

fn recruiter_cards(stats: &RecruiterStats) -> AnyView {
    view! {
        <div class="stats shadow w-full">
            {stat("Recruiters", stats.total, format!("{} inactive", stats.inactive))}
            {stat("Active recruiters", stats.active, "")}
        </div>
    }
    .into_any()
}

fn guide_cards(title: &str, stats: &GuideStats) -> AnyView {
    view! {
        <div class="stats stats-vertical lg:stats-horizontal shadow w-full">
            {stat(title, stats.total, format!("{} without a guide", stats.unassigned))}
            {stat("In progress", stats.in_progress, format!("{} not started", stats.not_started))}
            {stat("Completion", pct(stats.completion_rate), format!("{} completed", stats.completed))}
        </div>
    }
    .into_any()
}

fn closure_cards(stats: &ClosureStats) -> AnyView {
    let rating = stats
        .average_rating
        .map(|r| format!("{:.1} / 5", r))
        .unwrap_or_else(|| "-".to_string());
    view! {
        <div class="stats shadow w-full">
            {stat("Closures", stats.total, format!("{} closed", stats.closed))}
            {stat("Pending review", stats.pending_review, "")}
            {stat("Average rating", rating, "")}
        </div>
    }
    .into_any()
}

fn report_cards(stats: &ReportStats) -> AnyView {
    view! {
        <div class="stats shadow w-full">
            {stat("Weekly reports", stats.total, format!("{} hours logged", stats.total_hours))}
            {stat("Awaiting review", stats.awaiting_review, format!("{} reviewed", stats.reviewed))}
        </div>
    }
    .into_any()
}

/// 动作列表卡片：标题、条目、跳转链接
fn action_list(title: &'static str, link: &'static str, rows: Vec<String>) -> AnyView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between">
                    <h3 class="card-title">{title}</h3>
                    <A href=link attr:class="btn btn-ghost btn-sm">"Open"</A>
                </div>
                {if rows.is_empty() {
                    view! { <p class="text-base-content/50 text-sm">"Nothing to do."</p> }.into_any()
                } else {
                    view! {
                        <ul class="list-disc list-inside text-sm space-y-1">
                            {rows.into_iter().map(|r| view! { <li>{r}</li> }).collect_view()}
                        </ul>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
    .into_any()
}

fn coordinator(d: &CoordinatorDashboard) -> AnyView {
    view! {
        <div class="space-y-6">
            {section(&d.jobs, job_cards)}
            {section(&d.applications, application_cards)}
            {section(&d.trend, trend_card)}
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                {section(&d.sessions, session_cards)}
                {section(&d.recruiters, recruiter_cards)}
            </div>
            {section(&d.pending_jobs, |jobs| action_list(
                "Awaiting approval",
                "/approvals",
                jobs.iter().map(|j| j.title.clone()).collect(),
            ))}
        </div>
    }
    .into_any()
}

fn department(d: &DepartmentDashboard) -> AnyView {
    view! {
        <div class="space-y-6">
            {section(&d.jobs, job_cards)}
            {section(&d.applications, application_cards)}
            {section(&d.guides, |g| guide_cards("Students", g))}
            {section(&d.pending_jobs, |jobs| action_list(
                "Awaiting approval",
                "/approvals",
                jobs.iter().map(|j| j.title.clone()).collect(),
            ))}
        </div>
    }
    .into_any()
}

fn programme(d: &ProgrammeDashboard) -> AnyView {
    view! {
        <div class="space-y-6">
            {section(&d.sessions, session_cards)}
            {section(&d.guides, |g| guide_cards("Students", g))}
            {section(&d.closures, closure_cards)}
        </div>
    }
    .into_any()
}

fn faculty(d: &FacultyDashboard) -> AnyView {
    view! {
        <div class="space-y-6">
            {section(&d.students, |g| guide_cards("My students", g))}
            {section(&d.reports, report_cards)}
            {section(&d.closures, closure_cards)}
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                {section(&d.reports_to_review, |reports| action_list(
                    "Reports to review",
                    "/reports",
                    reports
                        .iter()
                        .map(|r| format!("{} - week {}", r.student_name, r.week))
                        .collect(),
                ))}
                {section(&d.awaiting_evaluation, |closures| action_list(
                    "Awaiting evaluation",
                    "/closures",
                    closures
                        .iter()
                        .map(|c| format!("{} - {}", c.student_name, c.internship_title))
                        .collect(),
                ))}
            </div>
        </div>
    }
    .into_any()
}

fn employer(d: &EmployerDashboard) -> AnyView {
    view! {
        <div class="space-y-6">
            {section(&d.jobs, job_cards)}
            {section(&d.applications, application_cards)}
            {section(&d.trend, trend_card)}
            {section(&d.to_review, |apps| action_list(
                "Applications to review",
                "/applications",
                apps.iter()
                    .map(|a| format!(
                        "{} - {}",
                        a.student_name.as_deref().unwrap_or("Student"),
                        a.job_title.as_deref().unwrap_or("Internship"),
                    ))
                    .collect(),
            ))}
        </div>
    }
    .into_any()
}

fn student(d: &StudentDashboard) -> AnyView {
    view! {
        <div class="space-y-6">
            {section(&d.applications, application_cards)}
            {section(&d.reports, report_cards)}
            {section(&d.open_positions, |jobs| action_list(
                "Open positions",
                "/jobs",
                jobs.iter()
                    .map(|j| match &j.company_name {
                        Some(company) => format!("{} at {}", j.title, company),
                        None => j.title.clone(),
                    })
                    .collect(),
            ))}
        </div>
    }
    .into_any()
}

#[component]
pub fn DashboardPage(role: Role) -> impl IntoView {
    let auth = use_auth();
    let scope = use_view_scope();
    let data = RwSignal::new(Option::<DashboardData>::None);

    // 挂载时并发拉取，离开页面时未完成的请求被中止
    if let Some(api) = auth.api() {
        let today = chrono::Local::now().date_naive();
        spawn_tracked(
            scope,
            async move { compose(role, &api, today).await },
            move |d| data.set(Some(d)),
        );
    }

    let name = auth
        .state
        .with_untracked(|s| s.user.as_ref().map(|u| u.name.clone()))
        .unwrap_or_default();

    view! {
        <div class="space-y-6">
            <PageHeader title=format!("{} dashboard", role.label()) subtitle=format!("Welcome back, {}", name) />
            {move || data.with(|d| match d {
                None => view! { <Loading /> }.into_any(),
                Some(DashboardData::Coordinator(d)) => coordinator(d),
                Some(DashboardData::Department(d)) => department(d),
                Some(DashboardData::Programme(d)) => programme(d),
                Some(DashboardData::Faculty(d)) => faculty(d),
                Some(DashboardData::Employer(d)) => employer(d),
                Some(DashboardData::Student(d)) => student(d),
            })}
        </div>
    }
}
