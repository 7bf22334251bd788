use crate::components::common::PageHeader;
use crate::components::toast::use_notify;
use crate::notify::Notification;
use leptos::prelude::*;

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let notify = use_notify();
    let feed = notify.feed;
    let (category, set_category) = signal(Option::<String>::None);

    let visible = move || {
        let selected = category.get();
        feed.with(|f| match &selected {
            Some(c) => f.by_category(c).cloned().collect::<Vec<_>>(),
            None => f.items().cloned().collect(),
        })
    };

    let tab = move |label: String, value: Option<String>| {
        let active = value.clone();
        view! {
            <button
                class="tab"
                class:tab-active=move || category.get() == active
                on:click=move |_| set_category.set(value.clone())
            >
                {label}
            </button>
        }
    };

    let item = move |n: Notification| {
        let id = n.id;
        view! {
            <div class=format!("{} shadow", n.kind.alert_class()) class:opacity-60=n.read>
                <div class="flex-1">
                    <h3 class="font-bold">
                        {n.title.clone()}
                        {n.category.clone().map(|c| view! { <span class="badge badge-ghost ml-2">{c}</span> })}
                    </h3>
                    <div class="text-sm">{n.message.clone()}</div>
                </div>
                <div class="flex gap-2">
                    {(!n.read).then(|| view! {
                        <button class="btn btn-ghost btn-xs" on:click=move |_| {
                            feed.update(|f| {
                                f.mark_read(id);
                            });
                        }>"Mark read"</button>
                    })}
                    <button class="btn btn-ghost btn-xs" on:click=move |_| {
                        feed.update(|f| {
                            f.dismiss(id);
                        });
                    }>"Dismiss"</button>
                </div>
            </div>
        }
    };

    view! {
        <PageHeader title="Notifications" subtitle="Activity from this session">
            <button
                class="btn btn-outline btn-sm"
                disabled=move || feed.with(|f| f.unread_count() == 0)
                on:click=move |_| feed.update(|f| f.mark_all_read())
            >
                "Mark all read"
            </button>
            <button
                class="btn btn-ghost btn-sm"
                disabled=move || feed.with(|f| f.is_empty())
                on:click=move |_| feed.update(|f| f.clear())
            >
                "Clear"
            </button>
        </PageHeader>

        <div role="tablist" class="tabs tabs-boxed">
            {tab("All".to_string(), None)}
            {move || {
                feed.with(|f| f.categories())
                    .into_iter()
                    .map(|c| tab(c.clone(), Some(c)))
                    .collect_view()
            }}
        </div>

        <div class="space-y-2">
            <Show
                when=move || !visible().is_empty()
                fallback=|| view! { <p class="text-center py-8 text-base-content/50">"No notifications."</p> }
            >
                <For each=visible key=|n| (n.id, n.read) children=item />
            </Show>
        </div>
    }
}
