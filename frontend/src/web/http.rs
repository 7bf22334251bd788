//! HTTP 请求实现模块
//!
//! 使用 `web_sys::fetch` 实现 `HttpClient`，超时语义沿用浏览器默认值。

use crate::error::{PortalError, PortalResult};
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct WebHttpClient;

impl WebHttpClient {
    async fn read_text(response: &Response) -> PortalResult<String> {
        let promise = response
            .text()
            .map_err(|e| PortalError::serialization(format!("{:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| PortalError::serialization(format!("{:?}", e)))?;

        text.as_string()
            .ok_or_else(|| PortalError::serialization("Response body is not text"))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for WebHttpClient {
    async fn send(&self, req: HttpRequest) -> PortalResult<HttpResponse> {
        let headers = Headers::new()
            .map_err(|e| PortalError::network(format!("Failed to create headers: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| PortalError::network(format!("Failed to set header: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| PortalError::network(format!("{:?}", e)))?;

        let window =
            web_sys::window().ok_or_else(|| PortalError::network("No window object available"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| PortalError::network(format!("{:?}", e)))?;

        let response: Response = resp_value.dyn_into().map_err(|e| {
            PortalError::serialization(format!("Unexpected fetch result: {:?}", e))
        })?;

        Ok(HttpResponse {
            status: response.status(),
            body: Self::read_text(&response).await?,
        })
    }
}
