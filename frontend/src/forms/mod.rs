//! 表单与工作流
//!
//! 表单只持有字段文本，校验和请求构造都是纯函数；组件把表单放进
//! `RwSignal` 中驱动界面。提交时先校验，校验失败不发请求，
//! 成功时恰好调用一次网关变更方法。

mod evaluation;
mod guide;
mod job;
mod login;
mod recruiter;
mod report;
mod review;
mod session;
mod user;

pub use evaluation::EvaluationForm;
pub use guide::{FeedbackForm, GuideAssignmentForm};
pub use internhub_shared::catalog::ProgramSelection;
pub use job::JobPostingForm;
pub use login::LoginForm;
pub use recruiter::RecruiterForm;
pub use report::{ProgressReportForm, ReportReviewForm};
pub use review::{
    approve_application, approve_job, close_job, reject_application, reject_job,
};
pub use session::SessionForm;
pub use user::UserForm;

use internhub_shared::validation::{ValidationError, ValidationResult, optional};

/// 可选数字字段：空白为 `None`，非数字报错
fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    label: &str,
    value: &str,
) -> ValidationResult<Option<T>> {
    match optional(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::new(field, format!("{} must be a number", label))),
    }
}

/// 必填数字字段
fn require_number<T: std::str::FromStr>(
    field: &'static str,
    label: &str,
    value: &str,
) -> ValidationResult<T> {
    parse_number(field, label, value)?
        .ok_or_else(|| ValidationError::new(field, format!("{} is required", label)))
}

fn filled(values: &[&str]) -> bool {
    values.iter().all(|v| !v.trim().is_empty())
}
