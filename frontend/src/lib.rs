//! InternHub 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route` / `web::guard` / `web::menu`: 路由表、角色守卫与菜单（纯函数）
//! - `web::router`: 把角色守卫接到 `leptos_router` 的每个页面上
//! - `gateway`: 每个后端资源一个网关 trait
//! - `dashboard` / `forms`: 仪表盘归约与表单工作流，不依赖界面
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

mod api;
mod auth;
mod config;
mod dashboard;
mod error;
mod forms;
mod gateway;
mod http;
mod notify;
mod scope;
mod session;

mod components {
    pub mod applications;
    pub mod closures;
    pub mod common;
    pub mod dashboard;
    pub mod guides;
    pub mod jobs;
    pub mod landing;
    pub mod layout;
    pub mod login;
    pub mod notifications;
    pub mod recruiters;
    pub mod reports;
    pub mod sessions;
    pub mod toast;
    pub mod users;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::applications::{ApplicationsPage, MyApplicationsPage};
use crate::components::closures::ClosuresPage;
use crate::components::dashboard::DashboardPage;
use crate::components::guides::{GuidesPage, MyStudentsPage};
use crate::components::jobs::{
    EditJobPage, JobApprovalsPage, JobDetailPage, JobsPage, PostJobPage,
};
use crate::components::landing::LandingPage;
use crate::components::layout::Shell;
use crate::components::login::LoginPage;
use crate::components::notifications::NotificationsPage;
use crate::components::recruiters::RecruitersPage;
use crate::components::reports::ReportsPage;
use crate::components::sessions::SessionsPage;
use crate::components::toast::{NotifyContext, ToastStack};
use crate::components::users::UsersPage;
use crate::config::PortalConfig;
use internhub_shared::Role;

use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    pub mod guard;
    mod http;
    pub mod menu;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::WebHttpClient;
    pub use storage::LocalStorage;
}

use web::router::{Guarded, provide_session_user};

/// 已登录页面：先过守卫，再套上带菜单的外框
fn private(page: fn() -> AnyView) -> impl IntoView {
    view! {
        <Guarded>
            <Shell>{page()}</Shell>
        </Guarded>
    }
}

/// 公共页面同样经过守卫，已登录用户会被送回自己的首页
fn public(page: fn() -> AnyView) -> impl IntoView {
    view! { <Guarded>{page()}</Guarded> }
}

#[component]
pub fn App() -> impl IntoView {
    let config = PortalConfig::from_env();

    // 1. 通知上下文（网关失败与变更结果都会推送到这里）
    provide_context(NotifyContext::new(config.feed_capacity, config.toast_duration));

    // 2. 创建认证上下文并从 LocalStorage 恢复会话
    let auth_ctx = AuthContext::new(config);
    provide_context(auth_ctx);
    init_auth(&auth_ctx);

    // 3. 当前用户信号注入给路由守卫（解耦！）
    provide_session_user(auth_ctx.user_signal());

    view! {
        <Router>
            <Routes fallback=|| view! { <Redirect path="/" /> }>
                <Route path=path!("/") view=|| public(|| view! { <LandingPage /> }.into_any()) />
                <Route path=path!("/login") view=|| public(|| view! { <LoginPage /> }.into_any()) />

                <Route path=path!("/coordinator") view=|| private(|| view! { <DashboardPage role=Role::InternshipCoordinator /> }.into_any()) />
                <Route path=path!("/hod") view=|| private(|| view! { <DashboardPage role=Role::HeadOfDepartment /> }.into_any()) />
                <Route path=path!("/faculty") view=|| private(|| view! { <DashboardPage role=Role::Faculty /> }.into_any()) />
                <Route path=path!("/recruiter") view=|| private(|| view! { <DashboardPage role=Role::Recruiter /> }.into_any()) />
                <Route path=path!("/student") view=|| private(|| view! { <DashboardPage role=Role::Student /> }.into_any()) />
                <Route path=path!("/placement") view=|| private(|| view! { <DashboardPage role=Role::Placement /> }.into_any()) />
                <Route path=path!("/corporate") view=|| private(|| view! { <DashboardPage role=Role::Corporate /> }.into_any()) />
                <Route path=path!("/programme") view=|| private(|| view! { <DashboardPage role=Role::ProgrammeCoordinator /> }.into_any()) />

                <Route path=path!("/sessions") view=|| private(|| view! { <SessionsPage /> }.into_any()) />
                <Route path=path!("/jobs") view=|| private(|| view! { <JobsPage /> }.into_any()) />
                <Route path=path!("/jobs/new") view=|| private(|| view! { <PostJobPage /> }.into_any()) />
                <Route path=path!("/jobs/:id") view=|| private(|| view! { <JobDetailPage /> }.into_any()) />
                <Route path=path!("/jobs/:id/edit") view=|| private(|| view! { <EditJobPage /> }.into_any()) />
                <Route path=path!("/approvals") view=|| private(|| view! { <JobApprovalsPage /> }.into_any()) />
                <Route path=path!("/applications") view=|| private(|| view! { <ApplicationsPage /> }.into_any()) />
                <Route path=path!("/my-applications") view=|| private(|| view! { <MyApplicationsPage /> }.into_any()) />
                <Route path=path!("/recruiters") view=|| private(|| view! { <RecruitersPage /> }.into_any()) />
                <Route path=path!("/guides") view=|| private(|| view! { <GuidesPage /> }.into_any()) />
                <Route path=path!("/my-students") view=|| private(|| view! { <MyStudentsPage /> }.into_any()) />
                <Route path=path!("/closures") view=|| private(|| view! { <ClosuresPage /> }.into_any()) />
                <Route path=path!("/reports") view=|| private(|| view! { <ReportsPage /> }.into_any()) />
                <Route path=path!("/admin/users") view=|| private(|| view! { <UsersPage /> }.into_any()) />
                <Route path=path!("/notifications") view=|| private(|| view! { <NotificationsPage /> }.into_any()) />
            </Routes>
        </Router>
        <ToastStack />
    }
}
