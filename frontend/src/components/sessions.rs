use crate::auth::use_auth;
use crate::components::common::{
    FieldError, PageHeader, StatusBadge, field, list_state, render_list, replace_item, settle,
    spawn_action, spawn_tracked, use_view_scope,
};
use crate::components::toast::use_notify;
use crate::forms::SessionForm;
use crate::gateway::SessionGateway;
use internhub_shared::AcademicSession;
use leptos::prelude::*;

const CATEGORY: &str = "sessions";

#[component]
pub fn SessionsPage() -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let scope = use_view_scope();

    let sessions = list_state::<AcademicSession>();
    let form = RwSignal::new(SessionForm::new());
    let (show_form, set_show_form) = signal(false);
    let error = RwSignal::new(Option::<String>::None);
    let (saving, set_saving) = signal(false);

    let reload = move || {
        if let Some(api) = auth.api() {
            spawn_tracked(scope, async move { api.get_all().await }, move |r| {
                settle(sessions, r)
            });
        }
    };
    reload();

    let open_form = move |initial: SessionForm| {
        form.set(initial);
        error.set(None);
        set_show_form.set(true);
    };

    let on_toggle = move |id: String| {
        let Some(api) = auth.api() else { return };
        spawn_action(
            scope,
            notify,
            CATEGORY,
            "Session status",
            async move { api.toggle_status(&id).await },
            move |session| {
                let message = format!(
                    "{} {} is now {}",
                    session.program,
                    session.batch,
                    if session.is_active { "active" } else { "archived" }
                );
                replace_item(sessions, session, |s| &s.id);
                message
            },
        );
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        // 本地校验失败时不发请求
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
                Ok(session) => {
                    notify.success(
                        CATEGORY,
                        "Session saved",
                        format!("{} {} ({})", session.program, session.batch, session.academic_year),
                    );
                    set_show_form.set(false);
                    reload();
                }
                Err(e) => notify.failure(CATEGORY, "Session not saved", &e),
            }
        });
    };

    let row = move |s: AcademicSession| {
        let edit = s.clone();
        let id = s.id.clone();
        let (label, tone) = if s.is_active {
            ("Active", "success")
        } else {
            ("Archived", "ghost")
        };
        view! {
            <tr>
                <td>{s.academic_year.clone()}</td>
                <td>
                    {s.program.clone()}
                    {s.sub_program.clone().map(|p| format!(" / {}", p))}
                </td>
                <td>{s.batch.clone()}</td>
                <td>{format!("{} - {}", s.start_date, s.end_date)}</td>
                <td><StatusBadge label=label tone=tone /></td>
                <td class="flex gap-2">
                    <button class="btn btn-ghost btn-xs" on:click=move |_| open_form(SessionForm::edit(&edit))>
                        "Edit"
                    </button>
                    <button class="btn btn-outline btn-xs" on:click=move |_| on_toggle(id.clone())>
                        {if s.is_active { "Archive" } else { "Activate" }}
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <PageHeader title="Academic sessions" subtitle="Programme batches and internship windows">
            <button class="btn btn-primary btn-sm" on:click=move |_| open_form(SessionForm::new())>
                "New session"
            </button>
        </PageHeader>

        <Show when=move || show_form.get()>
            <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                <div class="card-body space-y-2">
                    <h3 class="card-title">
                        {move || if form.with(|f| f.editing.is_some()) { "Edit session" } else { "New session" }}
                    </h3>
                    <FieldError error=error />
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        {field(form, "Academic year", "text", |f| f.academic_year.clone(), |f, v| f.academic_year = v)}
                        {field(form, "Program", "text", |f| f.program.clone(), |f, v| f.program = v)}
                        {field(form, "Sub-program", "text", |f| f.sub_program.clone(), |f, v| f.sub_program = v)}
                        {field(form, "Batch", "text", |f| f.batch.clone(), |f, v| f.batch = v)}
                        {field(form, "Start date", "date", |f| f.start_date.clone(), |f, v| f.start_date = v)}
                        {field(form, "End date", "date", |f| f.end_date.clone(), |f, v| f.end_date = v)}
                        {field(form, "Mode", "text", |f| f.mode.clone(), |f, v| f.mode = v)}
                        {field(form, "Duration", "text", |f| f.duration.clone(), |f, v| f.duration = v)}
                        {field(form, "Stipend", "number", |f| f.stipend.clone(), |f, v| f.stipend = v)}
                    </div>
                    <div class="card-actions justify-end">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_show_form.set(false)>
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || saving.get() || !form.with(SessionForm::can_submit)
                        >
                            "Save"
                        </button>
                    </div>
                </div>
            </form>
        </Show>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Year"</th>
                            <th>"Program"</th>
                            <th>"Batch"</th>
                            <th>"Window"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{render_list(sessions, "No academic sessions yet.", row)}</tbody>
                </table>
            </div>
        </div>
    }
}
