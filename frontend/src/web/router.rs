//! 路由接入
//!
//! 地址栏、历史记录和链接拦截交给 `leptos_router`；这里只把角色守卫挂到
//! 每个页面上。页面渲染前先按当前路径和会话用户求守卫结果，未放行时
//! 用重定向目标替换当前历史条目。

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use super::guard::{self, GuardOutcome};
use super::route::AppRoute;
use internhub_shared::User;

/// 守卫读取的会话用户；由外部注入，路由层不依赖认证模块
#[derive(Clone, Copy)]
struct SessionUser(Signal<Option<User>>);

pub fn provide_session_user(user: Signal<Option<User>>) {
    provide_context(SessionUser(user));
}

/// 当前地址对应的路由
pub fn use_current_route() -> Memo<AppRoute> {
    let location = use_location();
    Memo::new(move |_| AppRoute::from_path(&location.pathname.get()))
}

/// 受守卫保护的页面
///
/// 登录、登出或令牌失效都会改变会话用户，守卫随之重新求值，
/// 当前页面不再放行时立即离开。
#[component]
pub fn Guarded(children: ChildrenFn) -> impl IntoView {
    let SessionUser(user) =
        use_context::<SessionUser>().expect("SessionUser should be provided before <Routes>");
    let route = use_current_route();
    let decision = Memo::new(move |_| {
        let requested = route.get();
        user.with(|u| guard::check(&requested, u.as_ref()))
    });

    let navigate = use_navigate();
    Effect::new(move |_| {
        let decision = decision.get();
        if decision.outcome == GuardOutcome::Allow {
            return;
        }
        let requested = route.get_untracked();
        let state = decision.state;
        let target = decision.resolve(requested.clone());
        log_info!("[Router] {:?}: {} -> {}", state, requested, target);
        navigate(
            &target.to_path(),
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    });

    move || {
        decision
            .with(|d| d.outcome == GuardOutcome::Allow)
            .then(|| children())
    }
}
