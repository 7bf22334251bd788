//! 后端 API 客户端
//!
//! 所有网关共享的请求管线：拼接 URL、附加 Bearer 令牌、序列化请求体、
//! 映射错误，并在收到 401 时通知上层强制登出。

use crate::error::{PortalError, PortalResult};
use crate::http::{HttpClient, HttpRequest};
use crate::web::WebHttpClient;
use internhub_shared::protocol::ApiRequest;
use internhub_shared::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
use std::rc::Rc;

/// 浏览器中使用的客户端类型
pub type PortalApi = ApiClient<WebHttpClient>;

#[derive(Clone)]
pub struct ApiClient<C> {
    base_url: String,
    token: Option<String>,
    client: C,
    on_unauthorized: Option<Rc<dyn Fn()>>,
}

impl<C> std::fmt::Debug for ApiClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl<C> PartialEq for ApiClient<C> {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.token == other.token
    }
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(base_url: &str, client: C) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
            on_unauthorized: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// 注册 401 回调（强制登出 + 跳转登录页）
    pub fn on_unauthorized(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    #[cfg(test)]
    pub fn http_client(&self) -> &C {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发出一次请求并解析响应
    ///
    /// 没有重试；失败以 `PortalError` 返回，由调用方展示。
    pub async fn call<R: ApiRequest>(&self, request: R) -> PortalResult<R::Response> {
        let path = request.path();
        let op = format!("{} {}", R::METHOD.as_str(), path);

        let body = request
            .body()
            .map_err(|e| PortalError::from(e).in_op(op.clone()))?;

        let mut req = HttpRequest::new(&self.url(&path), R::METHOD).with_body(body);
        if req.body.is_some() {
            req = req.with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);
        }
        if let Some(token) = &self.token {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        let resp = match self.client.send(req).await {
            Ok(resp) => resp,
            Err(e) => {
                let e = e.in_op(op);
                log_error!("[Api] {}", e);
                return Err(e);
            }
        };

        if !resp.ok() {
            let e = PortalError::from_response(resp.status, &resp.body).in_op(op);
            log_error!("[Api] {}", e);
            if e.is_unauthorized() && self.token.is_some() {
                if let Some(hook) = &self.on_unauthorized {
                    hook();
                }
            }
            return Err(e);
        }

        // 204 / 空响应体按 JSON null 解析（对应 `()` 响应类型）
        let body = if resp.body.trim().is_empty() {
            "null"
        } else {
            resp.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| {
            let e = PortalError::from(e).in_op(op);
            log_error!("[Api] {}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockHttpClient;
    use internhub_shared::protocol::{DeleteUser, HttpMethod, ListSessions, LoginRequest};
    use internhub_shared::Credentials;
    use serde_json::json;
    use std::cell::Cell;

    const BASE: &str = "https://api.test";

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let api = ApiClient::new(BASE, MockHttpClient::new()).with_token("abc");
        api.client
            .mock_response(HttpMethod::Get, "https://api.test/sessions", 200, json!([]));

        let sessions = api.call(ListSessions).await.unwrap();
        assert!(sessions.is_empty());

        let requests = api.client.requests.borrow();
        let (_, _, headers, body) = &requests[0];
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer abc");
        assert!(body.is_none());
        assert!(!headers.contains_key("Content-Type"));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let api = ApiClient::new("https://api.test/", MockHttpClient::new());
        api.client
            .mock_response(HttpMethod::Get, "https://api.test/sessions", 200, json!([]));
        assert!(api.call(ListSessions).await.is_ok());
    }

    #[tokio::test]
    async fn test_unauthorized_triggers_hook() {
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let api = ApiClient::new(BASE, MockHttpClient::new())
            .with_token("expired")
            .on_unauthorized(move || counter.set(counter.get() + 1));
        api.client.mock_response(
            HttpMethod::Get,
            "https://api.test/sessions",
            401,
            json!({"message": "Token expired"}),
        );

        let err = api.call(ListSessions).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Token expired");
        assert_eq!(fired.get(), 1);
    }

    #[tokio::test]
    async fn test_login_failure_does_not_trigger_hook() {
        // 未登录时的 401 是凭据错误，不是会话过期
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let api = ApiClient::new(BASE, MockHttpClient::new()).on_unauthorized(move || flag.set(true));
        api.client.mock_response(
            HttpMethod::Post,
            "https://api.test/auth/login",
            401,
            json!({"message": "Invalid credentials"}),
        );

        let err = api
            .call(LoginRequest(Credentials {
                email: "a@b.co".to_string(),
                password: "x".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Invalid credentials");
        assert!(!fired.get());
    }

    #[tokio::test]
    async fn test_empty_body_decodes_as_unit() {
        let api = ApiClient::new(BASE, MockHttpClient::new()).with_token("t");
        api.client
            .mock_raw(HttpMethod::Delete, "https://api.test/admin/users/7", 204, "");
        api.call(DeleteUser { id: "7".to_string() }).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_response_is_serialization_error() {
        let api = ApiClient::new(BASE, MockHttpClient::new());
        api.client
            .mock_raw(HttpMethod::Get, "https://api.test/sessions", 200, "{\"oops\":");
        let err = api.call(ListSessions).await.unwrap_err();
        assert_eq!(err.error_code(), "JSON_PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        let api = ApiClient::new(BASE, MockHttpClient::new());
        api.client.set_network_down(true);
        let err = api.call(ListSessions).await.unwrap_err();
        assert_eq!(err.error_code(), "NETWORK_ERROR");
        assert_eq!(api.client.request_count(), 1);
    }
}
