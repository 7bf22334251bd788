use crate::auth::use_auth;
use crate::components::common::{
    ErrorBanner, FieldError, Loading, PageHeader, StatusBadge, area, field, hold_pending,
    list_state, remove_item, render_list, replace_item, settle, spawn_action, spawn_tracked,
    use_view_scope,
};
use crate::components::toast::use_notify;
use crate::dashboard::Section;
use crate::error::PortalResult;
use crate::forms::{JobPostingForm, approve_job, close_job, reject_job};
use crate::gateway::{ApplicationGateway, JobGateway};
use crate::web::route::AppRoute;
use internhub_shared::catalog::department_names;
use internhub_shared::stats::pending_approvals;
use internhub_shared::{EntityId, Internship, JobStatus, LocationType, Role};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

const CATEGORY: &str = "jobs";

pub(crate) fn status_tone(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Pending => "warning",
        JobStatus::Approved => "success",
        JobStatus::Rejected => "error",
        JobStatus::Closed => "ghost",
    }
}

fn location_label(location: LocationType) -> &'static str {
    match location {
        LocationType::Onsite => "On-site",
        LocationType::Remote => "Remote",
        LocationType::Hybrid => "Hybrid",
    }
}

fn stipend_label(job: &Internship) -> String {
    match (job.is_paid, job.stipend) {
        (true, Some(amount)) => format!("Paid ({:.0}/month)", amount),
        (true, None) => "Paid".to_string(),
        (false, _) => "Unpaid".to_string(),
    }
}

/// 岗位加载后的去向：不存在时回到列表，其余结果留在当前页展示
fn redirect_after_load(result: &PortalResult<Internship>) -> Option<AppRoute> {
    match result {
        Err(e) if e.is_not_found() => Some(AppRoute::Jobs),
        _ => None,
    }
}

/// 路由参数中的岗位 id
fn job_id_param() -> EntityId {
    use_params_map().with_untracked(|p| p.get("id").unwrap_or_default())
}

fn current_role() -> Option<Role> {
    use_auth()
        .state
        .with_untracked(|s| s.user.as_ref().and_then(|u| u.role))
}

/// 岗位列表：学生可申请，招聘方与协调员可关闭已通过的岗位
#[component]
pub fn JobsPage() -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let scope = use_view_scope();

    let role = current_role();
    let is_student = role == Some(Role::Student);
    let can_close = role.is_some_and(|r| {
        r.can_post_jobs() || matches!(r, Role::InternshipCoordinator | Role::Placement)
    });
    let can_post = role.is_some_and(|r| r.can_post_jobs());

    let jobs = list_state::<Internship>();
    // 学生已申请过的岗位
    let applied = RwSignal::new(Vec::<EntityId>::new());

    if let Some(api) = auth.api() {
        spawn_tracked(scope, async move { JobGateway::get_all(&api).await }, move |r| {
            settle(jobs, r)
        });
    }
    if is_student {
        if let Some(api) = auth.api() {
            spawn_tracked(
                scope,
                async move { ApplicationGateway::get_all(&api).await },
                move |r| {
                    if let Ok(apps) = r {
                        applied.set(apps.into_iter().map(|a| a.job_id).collect());
                    }
                },
            );
        }
    }

    let on_apply = move |job: Internship| {
        let Some(api) = auth.api() else { return };
        let title = job.title.clone();
        spawn_action(
            scope,
            notify,
            "applications",
            "Application",
            async move { ApplicationGateway::apply(&api, &job.id).await },
            move |application| {
                applied.update(|ids| ids.push(application.job_id));
                format!("Applied to {}", title)
            },
        );
    };

    let on_close = move |job: Internship| {
        let Some(api) = auth.api() else { return };
        spawn_action(
            scope,
            notify,
            CATEGORY,
            "Close internship",
            async move { close_job(&api, &job).await },
            move |closed| match closed {
                Some(job) => {
                    let message = format!("{} is closed", job.title);
                    replace_item(jobs, job, |j| &j.id);
                    message
                }
                None => "Nothing to close".to_string(),
            },
        );
    };

    let row = move |job: Internship| {
        let id = job.id.clone();
        let approved = job.status == JobStatus::Approved;
        let editable = can_post && JobPostingForm::is_editable(&job);
        let already_applied = move || applied.with(|ids| ids.contains(&id));
        let detail_path = AppRoute::JobDetail(job.id.clone()).to_path();
        let edit_path = AppRoute::EditJob(job.id.clone()).to_path();
        let title = job.title.clone();
        let company = job.company_name.clone().unwrap_or_default();
        let location = location_label(job.location_type);
        let duration = job.duration.clone();
        let stipend = stipend_label(&job);
        let programs = job.programs.join(", ");
        let status = job.status;
        let for_apply = job.clone();
        let for_close = job;
        view! {
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <A href=detail_path attr:class="card-title link link-hover">{title}</A>
                        <StatusBadge label=status.label() tone=status_tone(status) />
                    </div>
                    <p class="text-sm text-base-content/70">
                        {company} " · " {location} " · " {duration} " · " {stipend}
                    </p>
                    <p class="text-sm">{programs}</p>
                    <div class="card-actions justify-end">
                        {(is_student && approved).then(|| view! {
                            <Show
                                when=move || !already_applied()
                                fallback=|| view! { <span class="badge badge-info">"Applied"</span> }
                            >
                                <button class="btn btn-primary btn-sm" on:click={
                                    let job = for_apply.clone();
                                    move |_| on_apply(job.clone())
                                }>"Apply"</button>
                            </Show>
                        })}
                        {editable.then(|| view! {
                            <A href=edit_path attr:class="btn btn-ghost btn-sm">"Edit"</A>
                        })}
                        {(can_close && approved).then(|| view! {
                            <button class="btn btn-outline btn-sm" on:click=move |_| on_close(for_close.clone())>
                                "Close"
                            </button>
                        })}
                    </div>
                </div>
            </div>
        }
    };

    view! {
        <PageHeader title="Internships" subtitle="Postings visible to your role">
            {can_post.then(|| view! { <A href="/jobs/new" attr:class="btn btn-primary btn-sm">"Post internship"</A> })}
        </PageHeader>
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
            {render_list(jobs, "No internships posted yet.", row)}
        </div>
    }
}

/// 岗位详情；岗位不存在时回到列表并提示
#[component]
pub fn JobDetailPage() -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let navigate = use_navigate();
    let scope = use_view_scope();

    let id = job_id_param();
    let can_post = current_role().is_some_and(|r| r.can_post_jobs());
    let job = RwSignal::new(Option::<Section<Internship>>::None);

    if let Some(api) = auth.api() {
        spawn_tracked(scope, async move { JobGateway::get_by_id(&api, &id).await }, move |r| {
            if let Some(target) = redirect_after_load(&r) {
                if let Err(e) = &r {
                    notify.failure(CATEGORY, "Internship not found", e);
                }
                navigate(&target.to_path(), Default::default());
                return;
            }
            job.set(Some(Section::from(r)));
        });
    }

    view! {
        {move || match job.get() {
            None => view! { <Loading /> }.into_any(),
            Some(Section::Failed(msg)) => view! { <ErrorBanner message=msg /> }.into_any(),
            Some(Section::Loaded(job)) => {
                let edit_path = (can_post && JobPostingForm::is_editable(&job))
                    .then(|| AppRoute::EditJob(job.id.clone()).to_path());
                view! {
                    <PageHeader title=job.title.clone() subtitle=job.company_name.clone().unwrap_or_default()>
                        {edit_path.map(|href| view! {
                            <A href=href attr:class="btn btn-ghost btn-sm">"Edit"</A>
                        })}
                        <A href="/jobs" attr:class="btn btn-ghost btn-sm">"Back to internships"</A>
                    </PageHeader>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body space-y-2">
                            <StatusBadge label=job.status.label() tone=status_tone(job.status) />
                            <p class="whitespace-pre-line">{job.description.clone()}</p>
                            <div class="grid grid-cols-2 gap-2 text-sm">
                                <span class="font-semibold">"Department"</span>
                                <span>{job.department.clone().unwrap_or_else(|| "-".to_string())}</span>
                                <span class="font-semibold">"Programs"</span>
                                <span>{job.programs.join(", ")}</span>
                                <span class="font-semibold">"Location"</span>
                                <span>{location_label(job.location_type)}</span>
                                <span class="font-semibold">"Duration"</span>
                                <span>{job.duration.clone()}</span>
                                <span class="font-semibold">"Stipend"</span>
                                <span>{stipend_label(&job)}</span>
                                <span class="font-semibold">"Posted"</span>
                                <span>{job.created_at.format("%Y-%m-%d").to_string()}</span>
                            </div>
                        </div>
                    </div>
                }
                .into_any()
            }
        }}
    }
}

/// 岗位表单：新建与修改共用，院系变化时重新计算可选专业
#[component]
fn JobEditor(initial: JobPostingForm) -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let navigate = use_navigate();
    let scope = use_view_scope();

    let editing = initial.editing.is_some();
    let (done_title, failed_title) = if editing {
        ("Internship updated", "Internship not updated")
    } else {
        ("Internship posted", "Internship not posted")
    };
    let form = RwSignal::new(initial);
    let error = RwSignal::new(Option::<String>::None);
    let (saving, set_saving) = signal(false);

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
        let navigate = navigate.clone();
        spawn_tracked(scope, async move { current.submit(&api).await }, move |result| {
            set_saving.set(false);
            match result {
                Ok(job) => {
                    notify.success(CATEGORY, done_title, format!("{} is awaiting approval", job.title));
                    navigate(&AppRoute::JobDetail(job.id).to_path(), Default::default());
                }
                Err(e) => notify.failure(CATEGORY, failed_title, &e),
            }
        });
    };

    let program_options = move || {
        form.with(|f| {
            f.selection
                .options()
                .iter()
                .map(|&program| {
                    let checked = f.selection.programs().iter().any(|p| p == program);
                    view! {
                        <label class="label cursor-pointer justify-start gap-2">
                            <input
                                type="checkbox"
                                class="checkbox checkbox-sm"
                                prop:checked=checked
                                on:change=move |_| form.update(|f| f.selection.toggle_program(program))
                            />
                            <span class="label-text">{program}</span>
                        </label>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
            <div class="card-body space-y-2">
                <FieldError error=error />
                {field(form, "Title", "text", |f| f.title.clone(), |f, v| f.title = v)}
                {area(form, "Description", |f| f.description.clone(), |f, v| f.description = v)}

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <label class="form-control w-full">
                        <div class="label"><span class="label-text">"Department"</span></div>
                        <select
                            class="select select-bordered"
                            on:change=move |ev| {
                                let department = event_target_value(&ev);
                                form.update(|f| f.selection.select_department(&department));
                            }
                        >
                            <option value="" selected=move || form.with(|f| f.selection.department().is_empty())>
                                "Select a department"
                            </option>
                            {department_names()
                                .map(|name| view! {
                                    <option value=name selected=move || form.with(|f| f.selection.department() == name)>
                                        {name}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label class="form-control w-full">
                        <div class="label"><span class="label-text">"Location"</span></div>
                        <select
                            class="select select-bordered"
                            on:change=move |ev| {
                                if let Some(location) = LocationType::from_tag(&event_target_value(&ev)) {
                                    form.update(|f| f.location_type = location);
                                }
                            }
                        >
                            {LocationType::ALL
                                .into_iter()
                                .map(|l| view! {
                                    <option value=l.as_tag() selected=move || form.with(|f| f.location_type == l)>
                                        {location_label(l)}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                    </label>
                </div>

                <div class="form-control">
                    <div class="label"><span class="label-text">"Programs"</span></div>
                    <div class="flex flex-wrap gap-4">{program_options}</div>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4 items-end">
                    {field(form, "Duration", "text", |f| f.duration.clone(), |f, v| f.duration = v)}
                    <label class="label cursor-pointer justify-start gap-2">
                        <input
                            type="checkbox"
                            class="toggle toggle-primary"
                            prop:checked=move || form.with(|f| f.is_paid)
                            on:change=move |ev| {
                                let paid = event_target_checked(&ev);
                                form.update(|f| f.is_paid = paid);
                            }
                        />
                        <span class="label-text">"Paid internship"</span>
                    </label>
                    <Show when=move || form.with(|f| f.is_paid)>
                        {field(form, "Stipend (per month)", "number", |f| f.stipend.clone(), |f, v| f.stipend = v)}
                    </Show>
                </div>

                <div class="card-actions justify-end">
                    <A href="/jobs" attr:class="btn btn-ghost">"Cancel"</A>
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || saving.get() || !form.with(JobPostingForm::can_submit)
                    >
                        {if editing { "Save changes" } else { "Submit for approval" }}
                    </button>
                </div>
            </div>
        </form>
    }
}

/// 发布岗位
#[component]
pub fn PostJobPage() -> impl IntoView {
    view! {
        <PageHeader title="Post internship" subtitle="New postings are reviewed before students can see them" />
        <JobEditor initial=JobPostingForm::new() />
    }
}

/// 修改待审批的岗位；已审批或不存在的岗位回到详情或列表
#[component]
pub fn EditJobPage() -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let navigate = use_navigate();
    let scope = use_view_scope();

    let id = job_id_param();
    let loaded = RwSignal::new(Option::<Section<JobPostingForm>>::None);

    if let Some(api) = auth.api() {
        spawn_tracked(scope, async move { JobGateway::get_by_id(&api, &id).await }, move |r| {
            if let Some(target) = redirect_after_load(&r) {
                if let Err(e) = &r {
                    notify.failure(CATEGORY, "Internship not found", e);
                }
                navigate(&target.to_path(), Default::default());
                return;
            }
            match r {
                Ok(job) => match JobPostingForm::edit(&job) {
                    Some(form) => loaded.set(Some(Section::Loaded(form))),
                    None => {
                        notify.info(CATEGORY, "Not editable", format!("{} has already been reviewed", job.title));
                        navigate(&AppRoute::JobDetail(job.id).to_path(), Default::default());
                    }
                },
                Err(e) => loaded.set(Some(Section::Failed(e.message().to_string()))),
            }
        });
    }

    view! {
        <PageHeader title="Edit internship" subtitle="Changes are reviewed again before students can see them" />
        {move || match loaded.get() {
            None => view! { <Loading /> }.into_any(),
            Some(Section::Failed(msg)) => view! { <ErrorBanner message=msg /> }.into_any(),
            Some(Section::Loaded(form)) => view! { <JobEditor initial=form /> }.into_any(),
        }}
    }
}

/// 待审批岗位：通过或驳回（可附理由）
#[component]
pub fn JobApprovalsPage() -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let scope = use_view_scope();

    let jobs = list_state::<Internship>();
    let reasons = RwSignal::new(std::collections::HashMap::<EntityId, String>::new());

    // 已离开 PENDING 的岗位不再出现在待审批列表中
    if let Some(api) = auth.api() {
        spawn_tracked(scope, async move { JobGateway::get_all(&api).await }, move |r| {
            settle(
                jobs,
                r.map(|all| pending_approvals(&all).into_iter().cloned().collect()),
            )
        });
    }

    let decide = move |job: Internship, approve: bool, pending: RwSignal<bool>| {
        if pending.get_untracked() {
            return;
        }
        let Some(api) = auth.api() else { return };
        let reason = reasons.with_untracked(|r| r.get(&job.id).cloned().unwrap_or_default());
        let title = if approve { "Job approval" } else { "Job rejection" };
        spawn_action(
            scope,
            notify,
            CATEGORY,
            title,
            hold_pending(pending, async move {
                if approve {
                    approve_job(&api, &job).await
                } else {
                    reject_job(&api, &job, &reason).await
                }
            }),
            move |updated| match updated {
                Some(job) => {
                    remove_item(jobs, &job.id, |j| &j.id);
                    format!("{} is {}", job.title, job.status.label().to_lowercase())
                }
                None => "This posting was already reviewed".to_string(),
            },
        );
    };

    let row = move |job: Internship| {
        let id = job.id.clone();
        let pending = RwSignal::new(false);
        let for_approve = job.clone();
        let for_reject = job.clone();
        view! {
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">{job.title.clone()}</h3>
                    <p class="text-sm text-base-content/70">
                        {job.company_name.clone().unwrap_or_default()} " · " {job.programs.join(", ")}
                        " · submitted " {job.created_at.format("%Y-%m-%d").to_string()}
                    </p>
                    <p class="text-sm">{job.description.clone()}</p>
                    <input
                        type="text"
                        class="input input-bordered input-sm w-full"
                        placeholder="Reason (optional, sent on reject)"
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            reasons.update(|r| {
                                r.insert(id.clone(), value);
                            });
                        }
                    />
                    <div class="card-actions justify-end">
                        <button
                            class="btn btn-error btn-outline btn-sm"
                            disabled=move || pending.get()
                            on:click=move |_| decide(for_reject.clone(), false, pending)
                        >
                            "Reject"
                        </button>
                        <button
                            class="btn btn-success btn-sm"
                            disabled=move || pending.get()
                            on:click=move |_| decide(for_approve.clone(), true, pending)
                        >
                            "Approve"
                        </button>
                    </div>
                </div>
            </div>
        }
    };

    view! {
        <PageHeader title="Job approvals" subtitle="Oldest submissions first" />
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
            {render_list(jobs, "No postings awaiting approval.", row)}
        </div>
    }
}
