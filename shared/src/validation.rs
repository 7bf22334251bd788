//! 客户端校验规则
//!
//! 校验失败时不会发出任何网络请求；错误消息直接显示在表单中。

use crate::model::{
    Credentials, Evaluation, NewInternship, NewProgressReport, NewRecruiter, NewSession, NewUser,
};
use chrono::NaiveDate;
use std::fmt::Display;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_WEEKLY_HOURS: u32 = 80;
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

pub const MSG_END_BEFORE_START: &str = "End date must be after the start date";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T = ()> = Result<T, ValidationError>;

// =========================================================
// 通用规则
// =========================================================

/// 必填字段：去除首尾空白后不能为空，返回修剪后的值
pub fn require(field: &'static str, label: &str, value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, format!("{} is required", label)));
    }
    Ok(trimmed.to_string())
}

/// 可选文本：空白视为 `None`
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// 解析 `YYYY-MM-DD` 格式的日期（HTML date input 的值格式）
pub fn parse_date(field: &'static str, label: &str, value: &str) -> ValidationResult<NaiveDate> {
    let raw = require(field, label, value)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| ValidationError::new(field, format!("{} is not a valid date", label)))
}

/// 结束日期必须严格晚于开始日期
pub fn check_date_order(start: NaiveDate, end: NaiveDate) -> ValidationResult {
    if end <= start {
        return Err(ValidationError::new("endDate", MSG_END_BEFORE_START));
    }
    Ok(())
}

pub fn validate_email(field: &'static str, value: &str) -> ValidationResult<String> {
    let email = require(field, "Email", value)?;
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(ValidationError::new(field, "Email address is invalid"));
    }
    Ok(email)
}

pub fn validate_password(password: &str) -> ValidationResult {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

pub fn validate_password_pair(password: &str, confirm: &str) -> ValidationResult {
    validate_password(password)?;
    if password != confirm {
        return Err(ValidationError::new("confirmPassword", MSG_PASSWORD_MISMATCH));
    }
    Ok(())
}

// =========================================================
// 实体规则
// =========================================================

pub fn validate_credentials(credentials: &Credentials) -> ValidationResult {
    require("email", "Email", &credentials.email)?;
    if credentials.password.is_empty() {
        return Err(ValidationError::new("password", "Password is required"));
    }
    Ok(())
}

pub fn validate_session(session: &NewSession) -> ValidationResult {
    require("academicYear", "Academic year", &session.academic_year)?;
    require("program", "Program", &session.program)?;
    require("batch", "Batch", &session.batch)?;
    check_date_order(session.start_date, session.end_date)?;
    if session.stipend.is_some_and(|s| s < 0.0) {
        return Err(ValidationError::new("stipend", "Stipend cannot be negative"));
    }
    Ok(())
}

pub fn validate_job_posting(posting: &NewInternship) -> ValidationResult {
    require("title", "Title", &posting.title)?;
    require("description", "Description", &posting.description)?;
    require("duration", "Duration", &posting.duration)?;
    if posting.programs.is_empty() {
        return Err(ValidationError::new(
            "programs",
            "Select at least one eligible program",
        ));
    }
    if posting.is_paid {
        match posting.stipend {
            Some(s) if s > 0.0 => {}
            _ => {
                return Err(ValidationError::new(
                    "stipend",
                    "Paid internships need a stipend amount",
                ));
            }
        }
    }
    Ok(())
}

/// 招聘方入驻：确认密码不属于请求体，单独传入
pub fn validate_recruiter(recruiter: &NewRecruiter, confirm_password: &str) -> ValidationResult {
    require("name", "Name", &recruiter.name)?;
    validate_email("email", &recruiter.email)?;
    require("companyName", "Company name", &recruiter.company_name)?;
    validate_password_pair(&recruiter.password, confirm_password)
}

pub fn validate_new_user(user: &NewUser) -> ValidationResult {
    require("name", "Name", &user.name)?;
    validate_email("email", &user.email)?;
    validate_password(&user.password)
}

/// 指派教师：名称去空白后必须非空
pub fn validate_guide_name(name: &str) -> ValidationResult<String> {
    require("guideName", "Guide name", name)
}

pub fn validate_feedback(message: &str) -> ValidationResult<String> {
    require("feedback", "Feedback", message)
}

pub fn validate_evaluation(evaluation: &Evaluation) -> ValidationResult {
    if !RATING_RANGE.contains(&evaluation.rating) {
        return Err(ValidationError::new(
            "rating",
            "Rating must be between 1 and 5",
        ));
    }
    require("remarks", "Remarks", &evaluation.remarks)?;
    Ok(())
}

pub fn validate_progress_report(report: &NewProgressReport) -> ValidationResult {
    if report.week == 0 {
        return Err(ValidationError::new("week", "Week must be 1 or later"));
    }
    if report.hours_spent > MAX_WEEKLY_HOURS {
        return Err(ValidationError::new(
            "hoursSpent",
            format!("Hours cannot exceed {} per week", MAX_WEEKLY_HOURS),
        ));
    }
    require("summary", "Summary", &report.summary)?;
    Ok(())
}
