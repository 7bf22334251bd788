use crate::auth::use_auth;
use crate::components::common::{
    FieldError, ListState, PageHeader, StatusBadge, area, field, list_state, render_list, replace_item,
    settle, spawn_action, spawn_tracked, use_view_scope,
};
use crate::components::toast::use_notify;
use crate::dashboard::Section;
use crate::forms::{ProgressReportForm, ReportReviewForm};
use crate::gateway::{GuideGateway, ReportGateway};
use internhub_shared::{ProgressReport, ReportStatus, Role};
use leptos::prelude::*;

const CATEGORY: &str = "reports";

/// 周报：学生提交，指导教师审阅
#[component]
pub fn ReportsPage() -> impl IntoView {
    let auth = use_auth();
    let role = auth
        .state
        .with_untracked(|s| s.user.as_ref().and_then(|u| u.role));
    let is_student = role == Some(Role::Student);

    let notify = use_notify();
    let scope = use_view_scope();
    let reports = list_state::<ProgressReport>();

    if let Some(api) = auth.api() {
        spawn_tracked(scope, async move { ReportGateway::get_all(&api).await }, move |r| {
            settle(reports, r)
        });
    }

    let on_review = move |form: ReportReviewForm| {
        let Some(api) = auth.api() else { return };
        spawn_action(
            scope,
            notify,
            CATEGORY,
            "Report reviewed",
            async move { form.submit(&api).await },
            move |report| {
                let message = format!("Week {} of {} reviewed", report.week, report.student_name);
                replace_item(reports, report, |r| &r.id);
                message
            },
        );
    };

    let card = move |report: ProgressReport| {
        let reviewed = report.status == ReportStatus::Reviewed;
        let review_form = (!is_student)
            .then(|| ReportReviewForm::for_report(&report))
            .flatten()
            .map(|initial| {
                let form = RwSignal::new(initial);
                view! {
                    <div class="space-y-2">
                        <textarea
                            class="textarea textarea-bordered w-full"
                            placeholder="Comment for the student"
                            prop:value=move || form.with(|f| f.comment.clone())
                            on:input=move |ev| {
                                let comment = event_target_value(&ev);
                                form.update(|f| f.comment = comment);
                            }
                        ></textarea>
                        <div class="card-actions justify-end">
                            <button
                                class="btn btn-primary btn-sm"
                                disabled=move || !form.with(ReportReviewForm::can_submit)
                                on:click=move |_| on_review(form.get_untracked())
                            >
                                "Mark reviewed"
                            </button>
                        </div>
                    </div>
                }
            });

        view! {
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h3 class="card-title">
                            {format!("Week {}", report.week)}
                            {(!is_student).then(|| format!(" · {}", report.student_name))}
                        </h3>
                        <StatusBadge
                            label={if reviewed { "Reviewed" } else { "Submitted" }}
                            tone={if reviewed { "success" } else { "warning" }}
                        />
                    </div>
                    <p class="text-sm text-base-content/70">
                        {format!("{} hours · submitted {}", report.hours_spent, report.submitted_at.format("%Y-%m-%d"))}
                    </p>
                    <p class="whitespace-pre-line">{report.summary.clone()}</p>
                    {report.faculty_comment.clone().map(|c| view! {
                        <div class="alert text-sm py-2">
                            <span class="font-semibold">"Guide: "</span>
                            <span>{c}</span>
                        </div>
                    })}
                    {review_form}
                </div>
            </div>
        }
    };

    view! {
        <PageHeader
            title="Weekly reports"
            subtitle={if is_student { "Log your progress every week" } else { "Reports from the students you guide" }}
        />
        {is_student.then(|| view! { <SubmitReport reports=reports /> })}
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
            {render_list(reports, "No reports yet.", card)}
        </div>
    }
}

/// 学生提交周报；周次默认取已有周报的下一周
#[component]
fn SubmitReport(reports: ListState<ProgressReport>) -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let scope = use_view_scope();

    let form = RwSignal::new(ProgressReportForm::default());
    let error = RwSignal::new(Option::<String>::None);
    let (saving, set_saving) = signal(false);
    let (has_assignment, set_has_assignment) = signal(false);

    // 学生的指导分配决定周报归属
    if let Some(api) = auth.api() {
        spawn_tracked(scope, async move { GuideGateway::get_all(&api).await }, move |r| {
            match r.ok().and_then(|list| list.into_iter().next()) {
                Some(assignment) => {
                    form.update(|f| f.assignment_id = assignment.id);
                    set_has_assignment.set(true);
                }
                None => set_has_assignment.set(false),
            }
        });
    }

    Effect::new(move |_| {
        let next = reports.with(|s| match s {
            Some(Section::Loaded(list)) => ProgressReportForm::next_week(list),
            _ => 1,
        });
        form.update(|f| f.week = next.to_string());
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if let Err(e) = current.validate() {
            error.set(Some(e.message));
            return;
        }
        error.set(None);
        let Some(api) = auth.api() else { return };

        set_saving.set(true);
        spawn_tracked(scope, async move { current.submit(&api).await }, move |result| {
            set_saving.set(false);
            match result {
                Ok(report) => {
                    notify.success(CATEGORY, "Report submitted", format!("Week {} logged", report.week));
                    form.update(|f| {
                        f.summary.clear();
                        f.hours_spent.clear();
                    });
                    reports.update(|s| {
                        if let Some(Section::Loaded(list)) = s {
                            list.insert(0, report);
                        }
                    });
                }
                Err(e) => notify.failure(CATEGORY, "Report not submitted", &e),
            }
        });
    };

    view! {
        <Show
            when=move || has_assignment.get()
            fallback=|| view! {
                <div role="alert" class="alert alert-info text-sm">
                    <span>"Weekly reports open once a faculty guide is assigned to you."</span>
                </div>
            }
        >
            <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                <div class="card-body space-y-2">
                    <h3 class="card-title">"New weekly report"</h3>
                    <FieldError error=error />
                    <div class="grid grid-cols-2 gap-4">
                        {field(form, "Week", "number", |f| f.week.clone(), |f, v| f.week = v)}
                        {field(form, "Hours spent", "number", |f| f.hours_spent.clone(), |f, v| f.hours_spent = v)}
                    </div>
                    {area(form, "What did you work on?", |f| f.summary.clone(), |f, v| f.summary = v)}
                    <div class="card-actions justify-end">
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || saving.get() || !form.with(ProgressReportForm::can_submit)
                        >
                            "Submit report"
                        </button>
                    </div>
                </div>
            </form>
        </Show>
    }
}
