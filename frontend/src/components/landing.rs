use crate::auth::{logout, use_auth};
use leptos::prelude::*;
use leptos_router::components::A;

/// 公共落地页；已登录但角色未分配的用户也停留在这里
#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth();
    let pending_role = move || auth.state.with(|s| s.user.as_ref().is_some_and(|u| u.role.is_none()));
    let on_logout = move |_| logout(&auth);

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-4">
                    <h1 class="text-5xl font-bold">"InternHub"</h1>
                    <p class="text-base-content/70">
                        "Internship postings, applications, guide assignments, weekly logs and closures in one place."
                    </p>
                    <Show
                        when=pending_role
                        fallback=|| view! { <A href="/login" attr:class="btn btn-primary">"Sign in"</A> }
                    >
                        <div role="alert" class="alert alert-info">
                            <span>
                                "Your account is awaiting role assignment. Contact the internship coordinator."
                            </span>
                        </div>
                        <button class="btn btn-outline" on:click=on_logout>"Sign out"</button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
