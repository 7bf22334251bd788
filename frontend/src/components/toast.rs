//! 通知上下文与右上角提示框

use crate::error::PortalError;
use crate::notify::{NewNotification, NotificationFeed, NotificationId};
use leptos::prelude::*;
use std::time::Duration;

#[derive(Clone, Copy)]
pub struct NotifyContext {
    pub feed: RwSignal<NotificationFeed>,
    /// 当前显示为 toast 的通知
    toasts: RwSignal<Vec<NotificationId>>,
    toast_duration: Duration,
}

impl NotifyContext {
    pub fn new(capacity: usize, toast_duration: Duration) -> Self {
        Self {
            feed: RwSignal::new(NotificationFeed::new(capacity)),
            toasts: RwSignal::new(Vec::new()),
            toast_duration,
        }
    }

    pub fn push(&self, notification: NewNotification) {
        let mut id = 0;
        self.feed.update(|feed| id = feed.push(notification));
        self.toasts.update(|t| t.push(id));

        let toasts = self.toasts;
        set_timeout(
            move || toasts.update(|t| t.retain(|x| *x != id)),
            self.toast_duration,
        );
    }

    pub fn success(&self, category: &str, title: &str, message: impl Into<String>) {
        self.push(NewNotification::success(title, message).in_category(category));
    }

    pub fn info(&self, category: &str, title: &str, message: impl Into<String>) {
        self.push(NewNotification::info(title, message).in_category(category));
    }

    pub fn failure(&self, category: &str, title: &str, err: &PortalError) {
        self.push(NewNotification::from_error(title, err).in_category(category));
    }
}

pub fn use_notify() -> NotifyContext {
    use_context::<NotifyContext>().expect("NotifyContext should be provided")
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let notify = use_notify();

    let visible = move || {
        let ids = notify.toasts.get();
        notify.feed.with(|feed| {
            ids.iter()
                .filter_map(|id| feed.get(*id).cloned())
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="toast toast-top toast-end z-50">
            <For each=visible key=|n| n.id let:n>
                <div class=format!("{} shadow-lg", n.kind.alert_class())>
                    <div>
                        <h3 class="font-bold">{n.title.clone()}</h3>
                        <div class="text-xs">{n.message.clone()}</div>
                    </div>
                </div>
            </For>
        </div>
    }
}
