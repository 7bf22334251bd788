use crate::api::ApiClient;
use crate::error::PortalResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use internhub_shared::protocol::LoginRequest;
use internhub_shared::validation::validate_credentials;
use internhub_shared::{Credentials, LoginResponse};

#[async_trait(?Send)]
pub trait AuthGateway {
    /// 登录；失败时后端消息原样返回
    async fn login(&self, credentials: Credentials) -> PortalResult<LoginResponse>;
}

#[async_trait(?Send)]
impl<C: HttpClient> AuthGateway for ApiClient<C> {
    async fn login(&self, credentials: Credentials) -> PortalResult<LoginResponse> {
        validate_credentials(&credentials)?;
        let credentials = Credentials {
            email: credentials.email.trim().to_string(),
            password: credentials.password,
        };
        self.call(LoginRequest(credentials))
            .await
            .map_err(|e| e.in_op("auth.login"))
    }
}
