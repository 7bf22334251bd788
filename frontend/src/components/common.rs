//! 页面共用的小组件与异步加载工具

use crate::components::toast::NotifyContext;
use crate::dashboard::Section;
use crate::error::PortalResult;
use crate::scope::ViewScope;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

/// 绑定到当前视图生命周期的 scope 句柄
pub type ScopeHandle = StoredValue<ViewScope, LocalStorage>;

/// 创建视图 scope，视图卸载时中止全部未完成的请求
pub fn use_view_scope() -> ScopeHandle {
    let scope = StoredValue::new_local(ViewScope::new());
    on_cleanup(move || {
        scope.try_with_value(|s| s.cancel_all());
    });
    scope
}

/// 在 scope 内发出请求；视图已卸载时 `on_done` 不会被调用
pub fn spawn_tracked<T, F, D>(scope: ScopeHandle, future: F, on_done: D)
where
    T: 'static,
    F: Future<Output = T> + 'static,
    D: FnOnce(T) + 'static,
{
    let Some(tracked) = scope.try_with_value(|s| s.track(future)) else {
        return;
    };
    spawn_local(async move {
        if let Some(value) = tracked.await {
            on_done(value);
        }
    });
}

/// 执行一次变更：成功时 `on_ok` 处理结果并返回提示文本，失败时推送错误通知
///
/// 失败不改动任何本地状态，表单内容保留供用户修改后重新提交。
pub fn spawn_action<T, F, D>(
    scope: ScopeHandle,
    notify: NotifyContext,
    category: &'static str,
    title: &'static str,
    future: F,
    on_ok: D,
) where
    T: 'static,
    F: Future<Output = PortalResult<T>> + 'static,
    D: FnOnce(T) -> String + 'static,
{
    spawn_tracked(scope, future, move |result| match result {
        Ok(value) => {
            let message = on_ok(value);
            notify.success(category, title, message);
        }
        Err(e) => notify.failure(category, title, &e),
    });
}

/// 请求返回前 `pending` 保持为真，行内按钮据此禁用
pub fn hold_pending<F: Future>(
    pending: RwSignal<bool>,
    future: F,
) -> impl Future<Output = F::Output> {
    pending.set(true);
    async move {
        let output = future.await;
        pending.set(false);
        output
    }
}

/// 列表数据：`None` 表示加载中
pub type ListState<T> = RwSignal<Option<Section<Vec<T>>>>;

pub fn list_state<T: Send + Sync + 'static>() -> ListState<T> {
    RwSignal::new(None)
}

/// 把一次加载结果写入列表状态
pub fn settle<T: Send + Sync + 'static>(state: ListState<T>, result: PortalResult<Vec<T>>) {
    state.set(Some(Section::from(result)));
}

/// 用服务端返回的新记录替换列表中的旧记录
pub fn replace_item<T, K>(state: ListState<T>, item: T, key: impl Fn(&T) -> &K)
where
    T: Send + Sync + 'static,
    K: PartialEq + ?Sized,
{
    state.update(|s| {
        if let Some(Section::Loaded(items)) = s {
            if let Some(slot) = items.iter_mut().find(|i| key(i) == key(&item)) {
                *slot = item;
            }
        }
    });
}

/// 绑定到表单字段的输入框
pub fn field<T, G, S>(
    form: RwSignal<T>,
    label: &'static str,
    kind: &'static str,
    get: G,
    set: S,
) -> impl IntoView
where
    T: Send + Sync + 'static,
    G: Fn(&T) -> String + Copy + Send + Sync + 'static,
    S: Fn(&mut T, String) + Copy + 'static,
{
    view! {
        <label class="form-control w-full">
            <div class="label">
                <span class="label-text">{label}</span>
            </div>
            <input
                type=kind
                class="input input-bordered w-full"
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        </label>
    }
}

pub fn area<T, G, S>(form: RwSignal<T>, label: &'static str, get: G, set: S) -> impl IntoView
where
    T: Send + Sync + 'static,
    G: Fn(&T) -> String + Copy + Send + Sync + 'static,
    S: Fn(&mut T, String) + Copy + 'static,
{
    view! {
        <label class="form-control w-full">
            <div class="label">
                <span class="label-text">{label}</span>
            </div>
            <textarea
                class="textarea textarea-bordered w-full"
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            ></textarea>
        </label>
    }
}

/// 从列表中移除记录（状态已离开当前视图关心的范围）
pub fn remove_item<T, K>(state: ListState<T>, id: &K, key: impl Fn(&T) -> &K)
where
    T: Send + Sync + 'static,
    K: PartialEq + ?Sized,
{
    state.update(|s| {
        if let Some(Section::Loaded(items)) = s {
            items.retain(|i| key(i) != id);
        }
    });
}

#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between">
            <div>
                <h2 class="text-2xl font-bold">{title}</h2>
                {subtitle.map(|s| view! { <p class="text-base-content/70 text-sm">{s}</p> })}
            </div>
            <div class="flex gap-2">{children.map(|c| c())}</div>
        </div>
    }
}

#[component]
pub fn StatCard(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] hint: MaybeProp<String>,
) -> impl IntoView {
    view! {
        <div class="stat">
            <div class="stat-title">{title}</div>
            <div class="stat-value text-primary">{move || value.get()}</div>
            <div class="stat-desc">{move || hint.get().unwrap_or_default()}</div>
        </div>
    }
}

#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex justify-center py-8">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

#[component]
pub fn ErrorBanner(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div role="alert" class="alert alert-error text-sm py-2">
            <span>{message}</span>
        </div>
    }
}

/// 表单内联校验消息
#[component]
pub fn FieldError(error: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some)>
            <div role="alert" class="alert alert-warning text-sm py-2">
                <span>{move || error.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn StatusBadge(#[prop(into)] label: String, #[prop(into)] tone: String) -> impl IntoView {
    view! { <span class=format!("badge badge-{}", tone)>{label}</span> }
}

/// 按列表状态渲染：加载中 / 失败 / 空 / 内容
pub fn render_list<T, F, V>(state: ListState<T>, empty: &'static str, row: F) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> V + Clone + Send + Sync + 'static,
    V: IntoView + 'static,
{
    move || match state.get() {
        None => view! { <Loading /> }.into_any(),
        Some(Section::Failed(msg)) => view! { <ErrorBanner message=msg /> }.into_any(),
        Some(Section::Loaded(items)) if items.is_empty() => view! {
            <p class="text-center py-8 text-base-content/50">{empty}</p>
        }
        .into_any(),
        Some(Section::Loaded(items)) => {
            let row = row.clone();
            items.into_iter().map(row).collect_view().into_any()
        }
    }
}
