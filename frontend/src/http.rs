//! HTTP 抽象层
//!
//! 网关只依赖 `HttpClient` trait，浏览器中由 `web::WebHttpClient` 实现，
//! 测试中由 `MockHttpClient` 实现。

use crate::error::PortalResult;
use internhub_shared::protocol::HttpMethod;
use std::collections::HashMap;

#[cfg(test)]
use std::cell::RefCell;

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = body;
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 单次请求-响应往返，不做重试
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> PortalResult<HttpResponse>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // ("METHOD URL", (Status, Response Body))
    responses: RefCell<HashMap<String, (u16, String)>>,
    // 记录发出的请求 (Method, URL, Headers, Body)
    pub requests: RefCell<Vec<(String, String, HashMap<String, String>, Option<String>)>>,
    network_down: std::cell::Cell<bool>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
            network_down: std::cell::Cell::new(false),
        }
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.mock_raw(method, url, status, &body.to_string());
    }

    pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.responses.borrow_mut().insert(
            format!("{} {}", method.as_str(), url),
            (status, body.to_string()),
        );
    }

    /// 模拟请求无法发出
    pub fn set_network_down(&self, down: bool) {
        self.network_down.set(down);
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// 最近一次请求的 (Method, URL, Body)
    pub fn last_request(&self) -> Option<(String, String, Option<String>)> {
        self.requests
            .borrow()
            .last()
            .map(|(m, u, _, b)| (m.clone(), u.clone(), b.clone()))
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> PortalResult<HttpResponse> {
        self.requests.borrow_mut().push((
            req.method.as_str().to_string(),
            req.url.clone(),
            req.headers.clone(),
            req.body.clone(),
        ));

        if self.network_down.get() {
            return Err(crate::error::PortalError::network("Failed to fetch"));
        }

        let key = format!("{} {}", req.method.as_str(), req.url);
        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&key) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: r#"{"message":"Not Found"}"#.to_string(),
            })
        }
    }
}
