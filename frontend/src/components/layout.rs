//! 已登录页面的外框：顶栏、角色菜单与通知入口

use crate::auth::{logout, use_auth};
use crate::components::toast::use_notify;
use crate::web::menu::{is_active, menu_for};
use crate::web::router::use_current_route;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let route = use_current_route();
    let notify = use_notify();

    let role = move || auth.state.with(|s| s.user.as_ref().and_then(|u| u.role));
    let user_name = move || {
        auth.state
            .with(|s| s.user.as_ref().map(|u| u.name.clone()).unwrap_or_default())
    };
    let role_label = move || {
        role()
            .map(|r| r.label().to_string())
            .unwrap_or_else(|| "Awaiting role".to_string())
    };
    let unread = move || notify.feed.with(|f| f.unread_count());

    let on_logout = move |_| logout(&auth);

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <div class="navbar bg-base-100 shadow">
                <div class="flex-1 gap-2">
                    <A href="/" attr:class="btn btn-ghost text-xl">"InternHub"</A>
                    <span class="badge badge-neutral hidden md:inline-flex">{role_label}</span>
                </div>
                <div class="flex-none gap-2">
                    <A href="/notifications" attr:class="btn btn-ghost">
                        "Notifications"
                        <Show when=move || { unread() > 0 }>
                            <span class="badge badge-secondary">{unread}</span>
                        </Show>
                    </A>
                    <span class="hidden md:inline text-sm">{user_name}</span>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm">
                        "Sign out"
                    </button>
                </div>
            </div>

            <div class="flex">
                <ul class="menu bg-base-100 w-56 min-h-screen hidden md:flex">
                    {move || {
                        let current = route.get();
                        menu_for(role())
                            .iter()
                            .map(|item| {
                                let class = if is_active(item, &current) { "active" } else { "" };
                                view! {
                                    <li>
                                        <A href=item.path attr:class=class>{item.label}</A>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
                <main class="flex-1 p-4 md:p-8 space-y-6">{children()}</main>
            </div>
        </div>
    }
}
