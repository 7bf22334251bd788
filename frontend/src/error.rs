use std::fmt;

use internhub_shared::validation::ValidationError;
use serde::Deserialize;

// =========================================================
// 错误类型枚举
// =========================================================

/// 错误类型枚举
/// 对应界面上的四类处理方式：登录失效、表单提示、通知、返回列表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalErrorKind {
    /// 401: 凭据无效或令牌过期，触发强制登出
    Unauthorized,
    /// 客户端校验失败，不发请求，表单内联显示
    Validation,
    /// 404: 实体不存在，返回上级列表
    NotFound,
    /// 后端返回的其它非 2xx 响应
    Remote(u16),
    /// 请求未能到达后端
    Network,
    /// 响应体无法解析或请求体无法序列化
    Serialization,
}

impl PortalErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            PortalErrorKind::Unauthorized => "UNAUTHORIZED",
            PortalErrorKind::Validation => "INVALID_INPUT",
            PortalErrorKind::NotFound => "RESOURCE_NOT_FOUND",
            PortalErrorKind::Remote(_) => "REMOTE_ERROR",
            PortalErrorKind::Network => "NETWORK_ERROR",
            PortalErrorKind::Serialization => "JSON_PARSE_ERROR",
        }
    }

    /// 由 HTTP 状态码映射错误类型
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => PortalErrorKind::Unauthorized,
            404 => PortalErrorKind::NotFound,
            code => PortalErrorKind::Remote(code),
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "jobs.approve", "sessions.create"
    pub operation: String,
    /// 额外的细节信息，如实体 id
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 门户错误
///
/// - kind: 错误类型
/// - message: 面向用户的消息（后端消息原样保留）
/// - field: 校验错误对应的表单字段
/// - spans: 结构化的调用追踪栈
#[derive(Debug, Clone)]
pub struct PortalError {
    pub kind: PortalErrorKind,
    pub message: String,
    pub field: Option<&'static str>,
    spans: Vec<ErrorSpan>,
}

impl PortalError {
    pub fn new(kind: PortalErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PortalErrorKind::Network, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(PortalErrorKind::Serialization, message)
    }

    /// 由非 2xx 响应构造，优先使用后端错误负载中的消息
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = ErrorResponse::extract_message(body)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        Self::new(PortalErrorKind::from_status(status), message)
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == PortalErrorKind::Unauthorized
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == PortalErrorKind::NotFound
    }

    pub fn is_validation(&self) -> bool {
        self.kind == PortalErrorKind::Validation
    }
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for PortalError {}

pub type PortalResult<T> = std::result::Result<T, PortalError>;

// =========================================================
// 后端错误负载
// =========================================================

/// 后端错误响应体，常见形态为 `{"message": ...}` 或 `{"error": ...}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    fn extract_message(body: &str) -> Option<String> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_str::<ErrorResponse>(trimmed) {
            Ok(resp) => resp
                .message
                .or(resp.error)
                .filter(|m| !m.trim().is_empty()),
            // 非 JSON 的纯文本错误直接透传
            Err(_) if !trimmed.starts_with('{') && !trimmed.starts_with('<') => {
                Some(trimmed.to_string())
            }
            Err(_) => None,
        }
    }
}

// =========================================================
// 类型转换实现
// =========================================================

impl From<ValidationError> for PortalError {
    fn from(e: ValidationError) -> Self {
        let mut err = PortalError::new(PortalErrorKind::Validation, e.message);
        err.field = Some(e.field);
        err
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(e: serde_json::Error) -> Self {
        PortalError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_is_kept_verbatim() {
        let err = PortalError::from_response(401, r#"{"message":"Invalid email or password"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Invalid email or password");
    }

    #[test]
    fn test_error_field_fallback_and_plain_text() {
        let err = PortalError::from_response(409, r#"{"error":"Already applied"}"#);
        assert_eq!(err.kind, PortalErrorKind::Remote(409));
        assert_eq!(err.message(), "Already applied");

        let err = PortalError::from_response(500, "upstream timeout");
        assert_eq!(err.message(), "upstream timeout");

        let err = PortalError::from_response(502, "<html>bad gateway</html>");
        assert_eq!(err.message(), "Request failed with status 502");
    }

    #[test]
    fn test_display_includes_trace() {
        let err = PortalError::new(PortalErrorKind::NotFound, "Internship not found")
            .in_op_with("jobs.get", "42")
            .in_op("job_detail.load");
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "[RESOURCE_NOT_FOUND] Internship not found | trace: jobs.get(42) -> job_detail.load"
        );
    }

    #[test]
    fn test_validation_error_conversion_keeps_field() {
        let err: PortalError = ValidationError::new("endDate", "bad order").into();
        assert!(err.is_validation());
        assert_eq!(err.field, Some("endDate"));
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
