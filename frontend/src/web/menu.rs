//! 导航菜单
//!
//! 角色 -> 菜单 的静态表。`match` 穷尽所有角色，新增角色时编译器会提示补全。

use super::route::AppRoute;
use internhub_shared::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
}

impl MenuItem {
    const fn new(label: &'static str, path: &'static str) -> Self {
        Self { label, path }
    }
}

const NOTIFICATIONS: MenuItem = MenuItem::new("Notifications", "/notifications");

const COORDINATOR_MENU: &[MenuItem] = &[
    MenuItem::new("Dashboard", "/coordinator"),
    MenuItem::new("Sessions", "/sessions"),
    MenuItem::new("Internships", "/jobs"),
    MenuItem::new("Job Approvals", "/approvals"),
    MenuItem::new("Applications", "/applications"),
    MenuItem::new("Recruiters", "/recruiters"),
    MenuItem::new("Guide Assignments", "/guides"),
    MenuItem::new("Closures", "/closures"),
    MenuItem::new("Users", "/admin/users"),
    NOTIFICATIONS,
];

const HOD_MENU: &[MenuItem] = &[
    MenuItem::new("Dashboard", "/hod"),
    MenuItem::new("Sessions", "/sessions"),
    MenuItem::new("Internships", "/jobs"),
    MenuItem::new("Job Approvals", "/approvals"),
    MenuItem::new("Applications", "/applications"),
    MenuItem::new("Guide Assignments", "/guides"),
    MenuItem::new("Closures", "/closures"),
    NOTIFICATIONS,
];

const FACULTY_MENU: &[MenuItem] = &[
    MenuItem::new("Dashboard", "/faculty"),
    MenuItem::new("My Students", "/my-students"),
    MenuItem::new("Weekly Reports", "/reports"),
    MenuItem::new("Closures", "/closures"),
    NOTIFICATIONS,
];

const RECRUITER_MENU: &[MenuItem] = &[
    MenuItem::new("Dashboard", "/recruiter"),
    MenuItem::new("My Postings", "/jobs"),
    MenuItem::new("Post Internship", "/jobs/new"),
    MenuItem::new("Applications", "/applications"),
    NOTIFICATIONS,
];

const CORPORATE_MENU: &[MenuItem] = &[
    MenuItem::new("Dashboard", "/corporate"),
    MenuItem::new("My Postings", "/jobs"),
    MenuItem::new("Post Internship", "/jobs/new"),
    MenuItem::new("Applications", "/applications"),
    NOTIFICATIONS,
];

const STUDENT_MENU: &[MenuItem] = &[
    MenuItem::new("Dashboard", "/student"),
    MenuItem::new("Browse Internships", "/jobs"),
    MenuItem::new("My Applications", "/my-applications"),
    MenuItem::new("Weekly Reports", "/reports"),
    NOTIFICATIONS,
];

const PLACEMENT_MENU: &[MenuItem] = &[
    MenuItem::new("Dashboard", "/placement"),
    MenuItem::new("Internships", "/jobs"),
    MenuItem::new("Job Approvals", "/approvals"),
    MenuItem::new("Applications", "/applications"),
    MenuItem::new("Recruiters", "/recruiters"),
    NOTIFICATIONS,
];

const PROGRAMME_MENU: &[MenuItem] = &[
    MenuItem::new("Dashboard", "/programme"),
    MenuItem::new("Sessions", "/sessions"),
    MenuItem::new("Internships", "/jobs"),
    MenuItem::new("Guide Assignments", "/guides"),
    NOTIFICATIONS,
];

/// 未知或缺失的角色得到空菜单
pub fn menu_for(role: Option<Role>) -> &'static [MenuItem] {
    let Some(role) = role else {
        return &[];
    };
    match role {
        Role::InternshipCoordinator => COORDINATOR_MENU,
        Role::HeadOfDepartment => HOD_MENU,
        Role::Faculty => FACULTY_MENU,
        Role::Recruiter => RECRUITER_MENU,
        Role::Student => STUDENT_MENU,
        Role::Placement => PLACEMENT_MENU,
        Role::Corporate => CORPORATE_MENU,
        Role::ProgrammeCoordinator => PROGRAMME_MENU,
    }
}

/// 当前路由是否对应该菜单项（详情页和编辑页归属其列表项）
pub fn is_active(item: &MenuItem, current: &AppRoute) -> bool {
    match current {
        AppRoute::JobDetail(_) | AppRoute::EditJob(_) => item.path == "/jobs",
        other => other.to_path() == item.path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::route::home_path;

    #[test]
    fn test_unknown_role_gets_empty_menu() {
        assert!(menu_for(None).is_empty());
    }

    #[test]
    fn test_every_menu_entry_is_reachable_by_its_role() {
        for role in Role::ALL {
            let menu = menu_for(Some(role));
            assert_eq!(menu[0].path, home_path(role));
            for item in menu {
                let route = AppRoute::from_path(item.path);
                assert!(
                    route.allows(role),
                    "{} cannot open {} ({})",
                    role,
                    item.label,
                    item.path
                );
            }
        }
    }

    #[test]
    fn test_student_menu_matches_table() {
        let paths: Vec<_> = menu_for(Some(Role::Student))
            .iter()
            .map(|i| i.path)
            .collect();
        assert_eq!(
            paths,
            vec!["/student", "/jobs", "/my-applications", "/reports", "/notifications"]
        );
    }

    #[test]
    fn test_detail_page_highlights_list_entry() {
        let jobs = MenuItem::new("Internships", "/jobs");
        assert!(is_active(&jobs, &AppRoute::JobDetail("3".to_string())));
        assert!(is_active(&jobs, &AppRoute::EditJob("3".to_string())));
        assert!(!is_active(&jobs, &AppRoute::PostJob));
    }
}
