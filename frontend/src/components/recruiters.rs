use crate::auth::use_auth;
use crate::components::common::{
    FieldError, PageHeader, StatusBadge, field, list_state, render_list, replace_item, settle,
    spawn_action, spawn_tracked, use_view_scope,
};
use crate::components::toast::use_notify;
use crate::forms::RecruiterForm;
use crate::gateway::RecruiterGateway;
use internhub_shared::{AccountStatus, Recruiter};
use leptos::prelude::*;

const CATEGORY: &str = "recruiters";

#[component]
pub fn RecruitersPage() -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let scope = use_view_scope();

    let recruiters = list_state::<Recruiter>();
    let form = RwSignal::new(RecruiterForm::new());
    let (show_form, set_show_form) = signal(false);
    let error = RwSignal::new(Option::<String>::None);
    let (saving, set_saving) = signal(false);

    let reload = move || {
        if let Some(api) = auth.api() {
            spawn_tracked(scope, async move { api.get_all().await }, move |r| {
                settle(recruiters, r)
            });
        }
    };
    reload();

    let on_toggle = move |id: String| {
        let Some(api) = auth.api() else { return };
        spawn_action(
            scope,
            notify,
            CATEGORY,
            "Recruiter status",
            async move { api.toggle_status(&id).await },
            move |recruiter| {
                let message = match recruiter.status {
                    AccountStatus::Active => format!("{} can sign in again", recruiter.name),
                    AccountStatus::Inactive => format!("{} has been deactivated", recruiter.name),
                };
                replace_item(recruiters, recruiter, |r| &r.id);
                message
            },
        );
    };

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
                Ok(recruiter) => {
                    notify.success(
                        CATEGORY,
                        "Recruiter onboarded",
                        format!("{} ({})", recruiter.name, recruiter.company_name),
                    );
                    form.set(RecruiterForm::new());
                    set_show_form.set(false);
                    reload();
                }
                Err(e) => notify.failure(CATEGORY, "Recruiter not onboarded", &e),
            }
        });
    };

    let row = move |r: Recruiter| {
        let id = r.id.clone();
        let active = r.status == AccountStatus::Active;
        view! {
            <tr>
                <td>{r.name.clone()}</td>
                <td>{r.company_name.clone()}</td>
                <td>{r.email.clone()}</td>
                <td>{r.phone.clone().unwrap_or_default()}</td>
                <td>
                    <StatusBadge
                        label={if active { "Active" } else { "Inactive" }}
                        tone={if active { "success" } else { "ghost" }}
                    />
                </td>
                <td>
                    <button class="btn btn-outline btn-xs" on:click=move |_| on_toggle(id.clone())>
                        {if active { "Deactivate" } else { "Activate" }}
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <PageHeader title="Recruiters" subtitle="Corporate partners with portal access">
            <button class="btn btn-primary btn-sm" on:click=move |_| set_show_form.set(true)>
                "Onboard recruiter"
            </button>
        </PageHeader>

        <Show when=move || show_form.get()>
            <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                <div class="card-body space-y-2">
                    <h3 class="card-title">"Onboard recruiter"</h3>
                    <FieldError error=error />
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        {field(form, "Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                        {field(form, "Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                        {field(form, "Company", "text", |f| f.company_name.clone(), |f, v| f.company_name = v)}
                        {field(form, "Phone", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
                        {field(form, "Password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                        {field(form, "Confirm password", "password", |f| f.confirm_password.clone(), |f, v| f.confirm_password = v)}
                    </div>
                    <div class="card-actions justify-end">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_show_form.set(false)>
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || saving.get() || !form.with(RecruiterForm::can_submit)
                        >
                            "Create account"
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
                            <th>"Name"</th>
                            <th>"Company"</th>
                            <th>"Email"</th>
                            <th>"Phone"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{render_list(recruiters, "No recruiters onboarded yet.", row)}</tbody>
                </table>
            </div>
        </div>
    }
}
