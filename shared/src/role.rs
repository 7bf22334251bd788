//! 角色模型
//!
//! 后端以字符串标签传输角色（`"IC"`、`"HOD"`、`"PLACEMENT_OFFICER"` ...），
//! 客户端将其收敛为封闭枚举，所有"角色 -> X"的映射都使用穷尽匹配。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

const PLACEMENT_PREFIX: &str = "PLACEMENT_";

/// 门户用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// 实习协调员 (IC)，拥有审批权限
    InternshipCoordinator,
    /// 系主任 (HOD)
    HeadOfDepartment,
    /// 指导教师
    Faculty,
    /// 企业招聘人员
    Recruiter,
    /// 学生
    Student,
    /// 就业办公室（任意 `PLACEMENT_*` 标签）
    Placement,
    /// 企业账号
    Corporate,
    /// 专业协调员
    ProgrammeCoordinator,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::InternshipCoordinator,
        Role::HeadOfDepartment,
        Role::Faculty,
        Role::Recruiter,
        Role::Student,
        Role::Placement,
        Role::Corporate,
        Role::ProgrammeCoordinator,
    ];

    /// 解析后端角色标签，未知标签返回 `None`
    ///
    /// 大小写与首尾空白不敏感。
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_uppercase();
        match tag.as_str() {
            "IC" => Some(Self::InternshipCoordinator),
            "HOD" => Some(Self::HeadOfDepartment),
            "FACULTY" => Some(Self::Faculty),
            "RECRUITER" => Some(Self::Recruiter),
            "STUDENT" => Some(Self::Student),
            "CORPORATE" => Some(Self::Corporate),
            "PROGRAMME_COORDINATOR" => Some(Self::ProgrammeCoordinator),
            t if t.starts_with(PLACEMENT_PREFIX) && t.len() > PLACEMENT_PREFIX.len() => {
                Some(Self::Placement)
            }
            _ => None,
        }
    }

    /// 发送给后端的规范标签
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::InternshipCoordinator => "IC",
            Self::HeadOfDepartment => "HOD",
            Self::Faculty => "FACULTY",
            Self::Recruiter => "RECRUITER",
            Self::Student => "STUDENT",
            Self::Placement => "PLACEMENT_OFFICER",
            Self::Corporate => "CORPORATE",
            Self::ProgrammeCoordinator => "PROGRAMME_COORDINATOR",
        }
    }

    /// 界面显示名称
    pub fn label(&self) -> &'static str {
        match self {
            Self::InternshipCoordinator => "Internship Coordinator",
            Self::HeadOfDepartment => "Head of Department",
            Self::Faculty => "Faculty Guide",
            Self::Recruiter => "Recruiter",
            Self::Student => "Student",
            Self::Placement => "Placement Office",
            Self::Corporate => "Corporate Partner",
            Self::ProgrammeCoordinator => "Programme Coordinator",
        }
    }

    /// 是否拥有岗位/申请的审批权
    pub fn can_approve(&self) -> bool {
        matches!(
            self,
            Self::InternshipCoordinator | Self::HeadOfDepartment | Self::Placement
        )
    }

    /// 是否可以发布岗位
    pub fn can_post_jobs(&self) -> bool {
        matches!(self, Self::Recruiter | Self::Corporate)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Role::parse(&tag)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown role tag: {}", tag)))
    }
}

/// 宽松反序列化：缺失、null 或未知标签都得到 `None`，不会报错
///
/// 用于 `#[serde(default, deserialize_with = "role::lenient")]`。
pub fn lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Role>, D::Error> {
    let tag: Option<String> = Option::deserialize(deserializer)?;
    Ok(tag.as_deref().and_then(Role::parse))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!(Role::parse("IC"), Some(Role::InternshipCoordinator));
        assert_eq!(Role::parse("hod"), Some(Role::HeadOfDepartment));
        assert_eq!(Role::parse(" Faculty "), Some(Role::Faculty));
        assert_eq!(
            Role::parse("PROGRAMME_COORDINATOR"),
            Some(Role::ProgrammeCoordinator)
        );
    }

    #[test]
    fn test_parse_placement_wildcard() {
        assert_eq!(Role::parse("PLACEMENT_OFFICER"), Some(Role::Placement));
        assert_eq!(Role::parse("PLACEMENT_CELL"), Some(Role::Placement));
        // 仅有前缀不算合法标签
        assert_eq!(Role::parse("PLACEMENT_"), None);
    }

    #[test]
    fn test_parse_unknown_is_none() {
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("ADMIN"), None);
    }

    #[test]
    fn test_tag_round_trip_for_every_role() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_tag()), Some(role));
        }
    }

    #[test]
    fn test_lenient_deserialization() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(default, deserialize_with = "lenient")]
            role: Option<Role>,
        }

        let known: Probe = serde_json::from_str(r#"{"role":"STUDENT"}"#).unwrap();
        assert_eq!(known.role, Some(Role::Student));

        let unknown: Probe = serde_json::from_str(r#"{"role":"JANITOR"}"#).unwrap();
        assert_eq!(unknown.role, None);

        let null: Probe = serde_json::from_str(r#"{"role":null}"#).unwrap();
        assert_eq!(null.role, None);

        let missing: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.role, None);
    }
}
