use crate::auth::use_auth;
use crate::components::common::{
    PageHeader, StatusBadge, hold_pending, list_state, render_list, replace_item, settle,
    spawn_action, spawn_tracked, use_view_scope,
};
use crate::components::toast::use_notify;
use crate::forms::{approve_application, reject_application};
use crate::gateway::ApplicationGateway;
use internhub_shared::{Application, ApplicationStatus};
use leptos::prelude::*;

const CATEGORY: &str = "applications";

fn status_tone(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Pending => "warning",
        ApplicationStatus::Approved => "success",
        ApplicationStatus::Rejected => "error",
    }
}

fn job_title(app: &Application) -> String {
    app.job_title
        .clone()
        .unwrap_or_else(|| format!("Internship #{}", app.job_id))
}

/// 申请审核：审核动作只对 PENDING 状态显示
#[component]
pub fn ApplicationsPage() -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let scope = use_view_scope();

    let applications = list_state::<Application>();
    let (filter, set_filter) = signal(Option::<ApplicationStatus>::None);

    if let Some(api) = auth.api() {
        spawn_tracked(scope, async move { api.get_all().await }, move |r| {
            settle(applications, r)
        });
    }

    let decide = move |app: Application,
                       approve: bool,
                       reason: String,
                       pending: RwSignal<bool>| {
        if pending.get_untracked() {
            return;
        }
        let Some(api) = auth.api() else { return };
        let title = if approve {
            "Application approved"
        } else {
            "Application rejected"
        };
        spawn_action(
            scope,
            notify,
            CATEGORY,
            title,
            hold_pending(pending, async move {
                if approve {
                    approve_application(&api, &app).await
                } else {
                    reject_application(&api, &app, &reason).await
                }
            }),
            move |updated| match updated {
                Some(app) => {
                    let message = format!(
                        "{} for {}",
                        app.student_name.clone().unwrap_or_else(|| "Student".to_string()),
                        job_title(&app)
                    );
                    replace_item(applications, app, |a| &a.id);
                    message
                }
                None => "This application was already reviewed".to_string(),
            },
        );
    };

    let row = move |app: Application| {
        let reviewable = app.status.is_reviewable();
        let hidden = move || filter.get().is_some_and(|f| f != app.status);
        let reason = RwSignal::new(String::new());
        let pending = RwSignal::new(false);
        let for_approve = app.clone();
        let for_reject = app.clone();
        view! {
            <tr class:hidden=hidden>
                <td>{app.student_name.clone().unwrap_or_else(|| app.student_id.clone())}</td>
                <td>{job_title(&app)}</td>
                <td>{app.applied_at.format("%Y-%m-%d").to_string()}</td>
                <td>
                    <StatusBadge label=app.status.label() tone=status_tone(app.status) />
                    {app.rejection_reason.clone().map(|r| view! { <div class="text-xs text-base-content/60">{r}</div> })}
                </td>
                <td>
                    {reviewable.then(|| view! {
                        <div class="flex gap-2 items-center">
                            <input
                                type="text"
                                class="input input-bordered input-xs"
                                placeholder="Rejection reason"
                                prop:value=move || reason.get()
                                on:input=move |ev| reason.set(event_target_value(&ev))
                            />
                            <button
                                class="btn btn-error btn-outline btn-xs"
                                disabled=move || pending.get()
                                on:click=move |_| {
                                    decide(for_reject.clone(), false, reason.get_untracked(), pending)
                                }
                            >"Reject"</button>
                            <button
                                class="btn btn-success btn-xs"
                                disabled=move || pending.get()
                                on:click=move |_| decide(for_approve.clone(), true, String::new(), pending)
                            >"Approve"</button>
                        </div>
                    })}
                </td>
            </tr>
        }
    };

    let filter_button = move |label: &'static str, status: Option<ApplicationStatus>| {
        view! {
            <button
                class="btn btn-sm join-item"
                class:btn-active=move || filter.get() == status
                on:click=move |_| set_filter.set(status)
            >
                {label}
            </button>
        }
    };

    view! {
        <PageHeader title="Applications" subtitle="Review student applications">
            <div class="join">
                {filter_button("All", None)}
                {filter_button("Pending", Some(ApplicationStatus::Pending))}
                {filter_button("Approved", Some(ApplicationStatus::Approved))}
                {filter_button("Rejected", Some(ApplicationStatus::Rejected))}
            </div>
        </PageHeader>
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Student"</th>
                            <th>"Internship"</th>
                            <th>"Applied"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{render_list(applications, "No applications yet.", row)}</tbody>
                </table>
            </div>
        </div>
    }
}

/// 学生自己的申请记录
#[component]
pub fn MyApplicationsPage() -> impl IntoView {
    let auth = use_auth();
    let scope = use_view_scope();

    let applications = list_state::<Application>();

    if let Some(api) = auth.api() {
        spawn_tracked(scope, async move { api.get_all().await }, move |r| {
            settle(applications, r)
        });
    }

    let row = |app: Application| {
        view! {
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h3 class="card-title">{job_title(&app)}</h3>
                        <StatusBadge label=app.status.label() tone=status_tone(app.status) />
                    </div>
                    <p class="text-sm text-base-content/70">
                        "Applied on " {app.applied_at.format("%Y-%m-%d").to_string()}
                    </p>
                    {app.rejection_reason.clone().map(|r| view! {
                        <p class="text-sm text-error">"Reason: " {r}</p>
                    })}
                </div>
            </div>
        }
    };

    view! {
        <PageHeader title="My applications" />
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
            {render_list(applications, "You have not applied to any internship yet.", row)}
        </div>
    }
}
