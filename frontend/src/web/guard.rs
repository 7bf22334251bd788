//! 路由守卫
//!
//! 纯函数：根据目标路由和当前会话决定放行或重定向。
//! 状态机：未登录 / 已登录但角色未分配 / 已授权 / 越权。

use super::route::{AppRoute, home_route};
use internhub_shared::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unauthenticated,
    /// 已登录，但角色缺失或无法识别
    PendingRole,
    Authorized,
    Forbidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(AppRoute),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    pub state: GuardState,
    pub outcome: GuardOutcome,
}

impl GuardDecision {
    fn allow(state: GuardState) -> Self {
        Self {
            state,
            outcome: GuardOutcome::Allow,
        }
    }

    fn redirect(state: GuardState, to: AppRoute) -> Self {
        Self {
            state,
            outcome: GuardOutcome::Redirect(to),
        }
    }

    /// 最终落地的路由
    pub fn resolve(self, requested: AppRoute) -> AppRoute {
        match self.outcome {
            GuardOutcome::Allow => requested,
            GuardOutcome::Redirect(to) => to,
        }
    }
}

/// **核心守卫逻辑**
pub fn check(route: &AppRoute, user: Option<&User>) -> GuardDecision {
    let Some(user) = user else {
        return if route.is_public() {
            GuardDecision::allow(GuardState::Unauthenticated)
        } else {
            GuardDecision::redirect(GuardState::Unauthenticated, AppRoute::Login)
        };
    };

    let Some(role) = user.role else {
        // 角色未知：只能停留在落地页
        return match route {
            AppRoute::Landing => GuardDecision::allow(GuardState::PendingRole),
            _ => GuardDecision::redirect(GuardState::PendingRole, AppRoute::Landing),
        };
    };

    if route.is_public() {
        // 已登录用户离开登录页/落地页，进入自己的首页
        return GuardDecision::redirect(GuardState::Authorized, home_route(role));
    }

    if route.allows(role) {
        GuardDecision::allow(GuardState::Authorized)
    } else {
        GuardDecision::redirect(GuardState::Forbidden, home_route(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::user;
    use internhub_shared::Role;

    #[test]
    fn test_unauthenticated_is_sent_to_login() {
        let decision = check(&AppRoute::Sessions, None);
        assert_eq!(decision.state, GuardState::Unauthenticated);
        assert_eq!(decision.outcome, GuardOutcome::Redirect(AppRoute::Login));

        assert_eq!(check(&AppRoute::Login, None).outcome, GuardOutcome::Allow);
        assert_eq!(check(&AppRoute::Landing, None).outcome, GuardOutcome::Allow);
    }

    #[test]
    fn test_authorized_role_is_allowed() {
        let hod = user(Some(Role::HeadOfDepartment));
        let decision = check(&AppRoute::JobApprovals, Some(&hod));
        assert_eq!(decision.state, GuardState::Authorized);
        assert_eq!(decision.outcome, GuardOutcome::Allow);
    }

    #[test]
    fn test_forbidden_redirects_to_role_home() {
        let student = user(Some(Role::Student));
        let decision = check(&AppRoute::Recruiters, Some(&student));
        assert_eq!(decision.state, GuardState::Forbidden);
        assert_eq!(
            decision.resolve(AppRoute::Recruiters),
            AppRoute::Home(Role::Student)
        );
    }

    #[test]
    fn test_login_page_redirects_when_signed_in() {
        let recruiter = user(Some(Role::Recruiter));
        assert_eq!(
            check(&AppRoute::Login, Some(&recruiter)).outcome,
            GuardOutcome::Redirect(AppRoute::Home(Role::Recruiter))
        );
    }

    #[test]
    fn test_unknown_role_does_not_panic() {
        let pending = user(None);
        for route in [
            AppRoute::Landing,
            AppRoute::Login,
            AppRoute::Jobs,
            AppRoute::Users,
            AppRoute::Home(Role::InternshipCoordinator),
        ] {
            let decision = check(&route, Some(&pending));
            assert_eq!(decision.state, GuardState::PendingRole);
            assert_eq!(decision.resolve(route), AppRoute::Landing);
        }
    }

    #[test]
    fn test_every_role_reaches_its_home() {
        for role in Role::ALL {
            let u = user(Some(role));
            assert_eq!(
                check(&home_route(role), Some(&u)).outcome,
                GuardOutcome::Allow
            );
            assert_eq!(
                check(&AppRoute::Landing, Some(&u)).resolve(AppRoute::Landing),
                home_route(role)
            );
        }
    }
}
