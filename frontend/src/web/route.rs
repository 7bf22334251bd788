//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 静态路由表：path -> (页面, 允许访问的角色)。

use internhub_shared::{EntityId, Role};
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 公共落地页；未知路径也落到这里
    #[default]
    Landing,
    Login,
    /// 各角色的默认首页（仪表盘）
    Home(Role),
    Sessions,
    Jobs,
    JobDetail(EntityId),
    PostJob,
    EditJob(EntityId),
    JobApprovals,
    Applications,
    MyApplications,
    Recruiters,
    Guides,
    MyStudents,
    Closures,
    Reports,
    Users,
    Notifications,
}

use Role::*;

const ADMIN: &[Role] = &[InternshipCoordinator, HeadOfDepartment, Placement];
const JOB_VIEWERS: &[Role] = &[
    InternshipCoordinator,
    HeadOfDepartment,
    Placement,
    ProgrammeCoordinator,
    Recruiter,
    Corporate,
    Student,
];
const EMPLOYERS: &[Role] = &[Recruiter, Corporate];
const APPLICATION_REVIEWERS: &[Role] = &[
    InternshipCoordinator,
    HeadOfDepartment,
    Placement,
    Recruiter,
    Corporate,
];
const SESSION_MANAGERS: &[Role] = &[InternshipCoordinator, HeadOfDepartment, ProgrammeCoordinator];
const RECRUITER_MANAGERS: &[Role] = &[InternshipCoordinator, Placement];
const GUIDE_MANAGERS: &[Role] = &[InternshipCoordinator, HeadOfDepartment, ProgrammeCoordinator];
const CLOSURE_REVIEWERS: &[Role] = &[InternshipCoordinator, HeadOfDepartment, Faculty];
const REPORT_USERS: &[Role] = &[Faculty, Student];

/// 角色 -> 首页路径
pub fn home_path(role: Role) -> &'static str {
    match role {
        InternshipCoordinator => "/coordinator",
        HeadOfDepartment => "/hod",
        Faculty => "/faculty",
        Recruiter => "/recruiter",
        Student => "/student",
        Placement => "/placement",
        Corporate => "/corporate",
        ProgrammeCoordinator => "/programme",
    }
}

/// 角色的默认路由；越权访问时重定向到这里
pub fn home_route(role: Role) -> AppRoute {
    AppRoute::Home(role)
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举，无法识别时返回 `None`
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        let route = match path {
            "" => Self::Landing,
            "/login" => Self::Login,
            "/sessions" => Self::Sessions,
            "/jobs" => Self::Jobs,
            "/jobs/new" => Self::PostJob,
            "/approvals" => Self::JobApprovals,
            "/applications" => Self::Applications,
            "/my-applications" => Self::MyApplications,
            "/recruiters" => Self::Recruiters,
            "/guides" => Self::Guides,
            "/my-students" => Self::MyStudents,
            "/closures" => Self::Closures,
            "/reports" => Self::Reports,
            "/admin/users" => Self::Users,
            "/notifications" => Self::Notifications,
            other => {
                if let Some(rest) = other.strip_prefix("/jobs/") {
                    return match rest.split_once('/') {
                        None if !rest.is_empty() => Some(Self::JobDetail(rest.to_string())),
                        Some((id, "edit")) if !id.is_empty() => Some(Self::EditJob(id.to_string())),
                        _ => None,
                    };
                }
                return Role::ALL
                    .into_iter()
                    .find(|r| home_path(*r) == other)
                    .map(Self::Home);
            }
        };
        Some(route)
    }

    /// 未知路径重定向到落地页
    pub fn from_path(path: &str) -> Self {
        Self::parse(path).unwrap_or(Self::Landing)
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Home(role) => home_path(*role).to_string(),
            Self::Sessions => "/sessions".to_string(),
            Self::Jobs => "/jobs".to_string(),
            Self::JobDetail(id) => format!("/jobs/{}", id),
            Self::PostJob => "/jobs/new".to_string(),
            Self::EditJob(id) => format!("/jobs/{}/edit", id),
            Self::JobApprovals => "/approvals".to_string(),
            Self::Applications => "/applications".to_string(),
            Self::MyApplications => "/my-applications".to_string(),
            Self::Recruiters => "/recruiters".to_string(),
            Self::Guides => "/guides".to_string(),
            Self::MyStudents => "/my-students".to_string(),
            Self::Closures => "/closures".to_string(),
            Self::Reports => "/reports".to_string(),
            Self::Users => "/admin/users".to_string(),
            Self::Notifications => "/notifications".to_string(),
        }
    }

    /// 无需登录即可访问
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Landing | Self::Login)
    }

    /// **核心守卫数据：允许访问该路由的角色集合**
    ///
    /// 公共路由返回空集合，由 `is_public` 单独处理。
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Self::Landing | Self::Login => &[],
            Self::Home(role) => only(*role),
            Self::Sessions => SESSION_MANAGERS,
            Self::Jobs | Self::JobDetail(_) => JOB_VIEWERS,
            Self::PostJob | Self::EditJob(_) => EMPLOYERS,
            Self::JobApprovals => ADMIN,
            Self::Applications => APPLICATION_REVIEWERS,
            Self::MyApplications => &[Student],
            Self::Recruiters => RECRUITER_MANAGERS,
            Self::Guides => GUIDE_MANAGERS,
            Self::MyStudents => &[Faculty],
            Self::Closures => CLOSURE_REVIEWERS,
            Self::Reports => REPORT_USERS,
            Self::Users => &[InternshipCoordinator],
            Self::Notifications => &Role::ALL,
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

fn only(role: Role) -> &'static [Role] {
    match role {
        InternshipCoordinator => &[InternshipCoordinator],
        HeadOfDepartment => &[HeadOfDepartment],
        Faculty => &[Faculty],
        Recruiter => &[Recruiter],
        Student => &[Student],
        Placement => &[Placement],
        Corporate => &[Corporate],
        ProgrammeCoordinator => &[ProgrammeCoordinator],
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
