//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由守卫通过注入的用户信号求值；会话通过 `SessionStore` 持久化，
//! 页面重载后恢复同一身份。

use crate::api::PortalApi;
use crate::config::PortalConfig;
use crate::error::PortalResult;
use crate::forms::LoginForm;
use crate::session::SessionStore;
use crate::web::{LocalStorage, WebHttpClient};
use internhub_shared::User;
use leptos::prelude::*;

/// 认证状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    /// 因 401 被强制登出，登录页据此提示
    pub expired: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
    config: StoredValue<PortalConfig>,
}

impl AuthContext {
    pub fn new(config: PortalConfig) -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self {
            state,
            set_state,
            config: StoredValue::new(config),
        }
    }

    fn store(&self) -> SessionStore<LocalStorage> {
        SessionStore::new(LocalStorage, self.config.with_value(|c| c.session_key.clone()))
    }

    fn base_url(&self) -> String {
        self.config.with_value(|c| c.api_base_url.clone())
    }

    /// 当前用户信号（注入给路由守卫）
    pub fn user_signal(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.clone()))
    }

    /// 带令牌的 API 客户端；收到 401 时强制登出
    pub fn api(&self) -> Option<PortalApi> {
        let token = self.state.with_untracked(|s| s.token.clone())?;
        let ctx = *self;
        Some(
            PortalApi::new(&self.base_url(), WebHttpClient)
                .with_token(token)
                .on_unauthorized(move || expire(&ctx)),
        )
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 从持久化会话恢复认证状态
pub fn init_auth(ctx: &AuthContext) {
    let session = ctx.store().current_session();
    ctx.set_state.update(|state| {
        if let Some(session) = session {
            log_info!("[Auth] Restored session for {}", session.user.email);
            state.user = Some(session.user);
            state.token = Some(session.token);
        }
    });
}

/// 登录并持久化会话
///
/// 失败时返回后端原始消息，由登录表单内联显示。
pub async fn login(ctx: &AuthContext, form: LoginForm) -> PortalResult<User> {
    let api = PortalApi::new(&ctx.base_url(), WebHttpClient);
    let resp = form.submit(&api).await?;

    if !ctx
        .store()
        .set_current_user(resp.user.clone(), resp.token.clone())
    {
        log_warn!("[Auth] Session could not be persisted; it will not survive a reload");
    }

    let user = resp.user.clone();
    ctx.set_state.set(AuthState {
        user: Some(resp.user),
        token: Some(resp.token),
        expired: false,
    });
    Ok(user)
}

/// 注销并清除状态
///
/// 导航由路由守卫随会话用户变化自动处理。
pub fn logout(ctx: &AuthContext) {
    ctx.store().clear();
    ctx.set_state.set(AuthState::default());
}

/// 令牌失效（任意网关收到 401）
pub fn expire(ctx: &AuthContext) {
    if !ctx.state.with_untracked(AuthState::is_authenticated) {
        return;
    }
    log_warn!("[Auth] Token rejected by backend, signing out");
    ctx.store().clear();
    ctx.set_state.set(AuthState {
        expired: true,
        ..AuthState::default()
    });
}
