use crate::auth::use_auth;
use crate::components::common::{
    FieldError, PageHeader, StatusBadge, field, list_state, remove_item, render_list,
    replace_item, settle, spawn_action, spawn_tracked, use_view_scope,
};
use crate::components::toast::use_notify;
use crate::forms::UserForm;
use crate::gateway::UserGateway;
use internhub_shared::{AdminUser, Role};
use leptos::prelude::*;

const CATEGORY: &str = "users";

/// 账号管理（仅 IC）
#[component]
pub fn UsersPage() -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let scope = use_view_scope();

    let users = list_state::<AdminUser>();
    let form = RwSignal::new(UserForm::new());
    let (show_form, set_show_form) = signal(false);
    let error = RwSignal::new(Option::<String>::None);
    let (saving, set_saving) = signal(false);

    let reload = move || {
        if let Some(api) = auth.api() {
            spawn_tracked(scope, async move { api.get_all().await }, move |r| settle(users, r));
        }
    };
    reload();

    let on_toggle = move |id: String| {
        let Some(api) = auth.api() else { return };
        spawn_action(
            scope,
            notify,
            CATEGORY,
            "Account status",
            async move { api.toggle_status(&id).await },
            move |user| {
                let message = format!(
                    "{} is {}",
                    user.name,
                    if user.is_active { "active" } else { "disabled" }
                );
                replace_item(users, user, |u| &u.id);
                message
            },
        );
    };

    let on_delete = move |user: AdminUser| {
        let Some(api) = auth.api() else { return };
        let id = user.id.clone();
        spawn_action(
            scope,
            notify,
            CATEGORY,
            "Account deleted",
            async move { api.delete(&user.id).await },
            move |()| {
                remove_item(users, &id, |u| &u.id);
                "The account was removed".to_string()
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
                Ok(user) => {
                    notify.success(CATEGORY, "Account created", format!("{} <{}>", user.name, user.email));
                    form.set(UserForm::new());
                    set_show_form.set(false);
                    reload();
                }
                Err(e) => notify.failure(CATEGORY, "Account not created", &e),
            }
        });
    };

    let row = move |user: AdminUser| {
        let id = user.id.clone();
        let for_delete = user.clone();
        view! {
            <tr>
                <td>{user.name.clone()}</td>
                <td>{user.email.clone()}</td>
                <td>{user.role.map(|r| r.label()).unwrap_or("Unassigned")}</td>
                <td>
                    <StatusBadge
                        label={if user.is_active { "Active" } else { "Disabled" }}
                        tone={if user.is_active { "success" } else { "ghost" }}
                    />
                </td>
                <td class="flex gap-2">
                    <button class="btn btn-outline btn-xs" on:click=move |_| on_toggle(id.clone())>
                        {if user.is_active { "Disable" } else { "Enable" }}
                    </button>
                    <button class="btn btn-error btn-outline btn-xs" on:click=move |_| on_delete(for_delete.clone())>
                        "Delete"
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <PageHeader title="Users" subtitle="Portal accounts and roles">
            <button class="btn btn-primary btn-sm" on:click=move |_| set_show_form.set(true)>
                "New account"
            </button>
        </PageHeader>

        <Show when=move || show_form.get()>
            <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                <div class="card-body space-y-2">
                    <h3 class="card-title">"New account"</h3>
                    <FieldError error=error />
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        {field(form, "Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                        {field(form, "Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                        <label class="form-control w-full">
                            <div class="label"><span class="label-text">"Role"</span></div>
                            <select
                                class="select select-bordered"
                                on:change=move |ev| {
                                    let role = Role::parse(&event_target_value(&ev));
                                    form.update(|f| f.role = role);
                                }
                            >
                                <option value="" selected=move || form.with(|f| f.role.is_none())>
                                    "Select a role"
                                </option>
                                {Role::ALL
                                    .into_iter()
                                    .map(|r| view! { <option value=r.as_tag()>{r.label()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                        {field(form, "Department id", "text", |f| f.department_id.clone(), |f, v| f.department_id = v)}
                        {field(form, "Password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                    </div>
                    <div class="card-actions justify-end">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_show_form.set(false)>
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || saving.get() || !form.with(UserForm::can_submit)
                        >
                            "Create"
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
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{render_list(users, "No accounts yet.", row)}</tbody>
                </table>
            </div>
        </div>
    }
}
